/// `from`/`size` 形式のページ指定。
///
/// オフセットはページ境界に揃える（`from = 3, size = 2` なら 2 件目から）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub from: i64,
    pub size: i64,
}

impl Pagination {
    pub const DEFAULT_SIZE: i64 = 20;

    pub fn new(from: i64, size: i64) -> Self {
        Self { from, size }
    }

    pub fn limit(&self) -> i64 {
        self.size.max(1)
    }

    pub fn offset(&self) -> i64 {
        let size = self.limit();
        (self.from.max(0) / size) * size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}
