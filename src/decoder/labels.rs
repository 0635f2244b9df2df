//! Class label tables and per-variant label policies.

/// Sentinel label for class ids that fall outside the table.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// COCO dataset class names, index = class id.
const COCO_CLASSES: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

/// An ordered class-id-to-label table, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parse a newline-delimited label resource; line index = class id.
    pub fn parse(text: &str) -> Self {
        Self {
            labels: text.lines().map(str::to_owned).collect(),
        }
    }

    /// The 80-class COCO table most general-purpose detectors ship with.
    pub fn coco() -> Self {
        Self {
            labels: COCO_CLASSES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Look up a class id. Negative or out-of-range ids yield `None`.
    pub fn get(&self, class_id: i64) -> Option<&str> {
        if class_id < 0 {
            return None;
        }
        self.labels.get(class_id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// How a decoder variant turns class ids into labels.
#[derive(Debug, Clone, Copy)]
pub enum LabelPolicy<'a> {
    /// No label resolution; the class id stands alone.
    None,
    /// Table lookup with the `"Unknown"` sentinel for out-of-range ids.
    Table(&'a LabelTable),
    /// Fixed literal for single-class models.
    Fixed(&'a str),
}

impl LabelPolicy<'_> {
    /// Resolve a class id to a label. Total over any id; never an error.
    pub fn resolve(&self, class_id: i64) -> Option<String> {
        match self {
            LabelPolicy::None => None,
            LabelPolicy::Table(table) => {
                Some(table.get(class_id).unwrap_or(UNKNOWN_LABEL).to_string())
            }
            LabelPolicy::Fixed(label) => Some((*label).to_string()),
        }
    }
}
