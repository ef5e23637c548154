use serde::{Deserialize, Serialize};

use super::text::{FontWeight, TextStyle};

/// A personalization token offered in the merge-tag menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeTagDescriptor {
    pub tag: &'static str,
    pub label: &'static str,
}

pub const MERGE_TAGS: [MergeTagDescriptor; 6] = [
    MergeTagDescriptor {
        tag: "{{FirstName}}",
        label: "First Name",
    },
    MergeTagDescriptor {
        tag: "{{LastName}}",
        label: "Last Name",
    },
    MergeTagDescriptor {
        tag: "{{Address}}",
        label: "Street Address",
    },
    MergeTagDescriptor {
        tag: "{{City}}",
        label: "City",
    },
    MergeTagDescriptor {
        tag: "{{State}}",
        label: "State",
    },
    MergeTagDescriptor {
        tag: "{{ZipCode}}",
        label: "Zip Code",
    },
];

impl MergeTagDescriptor {
    pub fn find(tag: &str) -> Option<&'static MergeTagDescriptor> {
        MERGE_TAGS.iter().find(|d| d.tag == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeTagElement {
    pub tag: String,
    pub label: String,
    pub style: TextStyle,
}

impl MergeTagElement {
    pub fn from_descriptor(descriptor: &MergeTagDescriptor) -> Self {
        Self {
            tag: descriptor.tag.to_string(),
            label: descriptor.label.to_string(),
            style: TextStyle {
                font_size: 18.0,
                font_weight: FontWeight::Bold,
                color: "#7C3AED".to_string(),
                ..TextStyle::default()
            },
        }
    }
}
