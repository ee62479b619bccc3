use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub limit: u32,
    pub total_items: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(current_page: u32, limit: u32, total_items: u32) -> Self {
        let total_pages = total_items.div_ceil(limit);
        Self {
            current_page,
            limit,
            total_items,
            total_pages,
        }
    }
}
