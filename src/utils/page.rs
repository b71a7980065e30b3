/// Fixed-size pages over a list of items
pub struct Page<'a, T> {
    items: &'a [T],
    per_page: usize,
    pub current_page: usize,
}

impl<'a, T> Page<'a, T> {
    /// Create a pagination over `items`, starting on the first page
    pub fn new(items: &'a [T], per_page: usize) -> Self {
        Page {
            items,
            per_page: per_page.max(1),
            current_page: 0,
        }
    }

    /// Jump to a 1-based page number
    pub fn goto(mut self, page_num: usize) -> Result<Self, String> {
        let total = self.total_pages();
        if page_num < 1 || page_num > total {
            return Err(format!(
                "❌ Invalid page number. This list has {} page(s)",
                total
            ));
        }
        self.current_page = page_num - 1;
        Ok(self)
    }

    /// Items on the current page
    pub fn current_items(&self) -> &'a [T] {
        let start = self.current_page * self.per_page;
        let end = std::cmp::min(start + self.per_page, self.items.len());
        &self.items[start.min(end)..end]
    }

    /// Get total number of pages. An empty list still has one page.
    pub fn total_pages(&self) -> usize {
        ((self.items.len() + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn is_last(&self) -> bool {
        self.current_page + 1 == self.total_pages()
    }
}
