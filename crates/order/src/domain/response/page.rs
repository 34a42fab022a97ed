/// One page of results plus the total number of matching elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: i64) -> Self {
        Self {
            content,
            number,
            size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.size == 0 {
            return 1;
        }
        let size = i64::from(self.size);
        (self.total_elements + size - 1) / size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Page::<u8>::new(vec![], 0, 20, 0).total_pages(), 0);
        assert_eq!(Page::<u8>::new(vec![], 0, 20, 1).total_pages(), 1);
        assert_eq!(Page::<u8>::new(vec![], 0, 20, 20).total_pages(), 1);
        assert_eq!(Page::<u8>::new(vec![], 0, 20, 41).total_pages(), 3);
    }
}
