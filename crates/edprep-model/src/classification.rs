//! Result of classifying a single diagnosis code.

use serde::{Deserialize, Serialize};

/// Disease taxonomy labels assigned to one diagnosis code.
///
/// Both labels are always populated: an unmapped category resolves to
/// `"Other"` and a missing reference entry leaves the subcategory as `"Other"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// First three characters of the trimmed code (e.g. `"I21"`, `"410"`).
    pub category_code: String,
    /// Coarse bucket from the disease taxonomy (e.g. `"Circulatory System"`).
    pub category: String,
    /// Fine-grained label from the reference table (e.g. a block title).
    pub subcategory: String,
}

impl Classification {
    pub const FALLBACK: &'static str = "Other";
}
