/// Rotating page cursor. The stored index is reduced modulo the page count
/// of whatever list is passed in, so a shrunk list never slices out of bounds.
#[derive(Debug, Clone)]
pub struct Carousel {
    page_size: usize,
    index: usize,
}

impl Carousel {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            index: 0,
        }
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    pub fn current_index(&self, len: usize) -> usize {
        match self.page_count(len) {
            0 => 0,
            count => self.index % count,
        }
    }

    pub fn advance(&mut self, len: usize) {
        let count = self.page_count(len);
        if count == 0 {
            return;
        }
        self.index = (self.current_index(len) + 1) % count;
    }

    pub fn current_page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if items.is_empty() {
            return items;
        }
        let start = self.current_index(items.len()) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_page_count() {
        let carousel = Carousel::new(6);
        assert_eq!(0, carousel.page_count(0));
        assert_eq!(1, carousel.page_count(1));
        assert_eq!(1, carousel.page_count(6));
        assert_eq!(2, carousel.page_count(7));
        assert_eq!(3, carousel.page_count(18));
    }

    #[test]
    fn test_empty_list_never_advances() {
        let mut carousel = Carousel::new(6);
        carousel.advance(0);
        carousel.advance(0);
        assert_eq!(0, carousel.current_index(0));
        assert!(carousel.current_page::<u32>(&[]).is_empty());
    }

    #[test]
    fn test_eighteen_items_cycle_through_three_pages() {
        let items: Vec<u32> = (0..18).collect();
        let mut carousel = Carousel::new(6);
        let mut seen = Vec::new();

        for _ in 0..6 {
            seen.push(carousel.current_page(&items).to_vec());
            carousel.advance(items.len());
        }

        let distinct: HashSet<Vec<u32>> = seen.iter().cloned().collect();
        assert_eq!(3, distinct.len());
        assert_eq!(seen[0], seen[3]);
        assert_eq!(seen[1], seen[4]);
        assert_eq!(vec![12, 13, 14, 15, 16, 17], seen[2]);
    }

    #[test]
    fn test_page_sizes_and_index_bounds() {
        for len in 1..40usize {
            let items: Vec<usize> = (0..len).collect();
            let mut carousel = Carousel::new(6);
            for _ in 0..10 {
                let index = carousel.current_index(len);
                assert!(index < carousel.page_count(len));

                let remaining = len - index * 6;
                assert_eq!(remaining.min(6), carousel.current_page(&items).len());
                carousel.advance(len);
            }
        }
    }

    #[test]
    fn test_shrunk_list_is_clamped() {
        let long: Vec<u32> = (0..18).collect();
        let mut carousel = Carousel::new(6);
        carousel.advance(long.len());
        carousel.advance(long.len());
        assert_eq!(2, carousel.current_index(long.len()));

        // refresh replaced 18 items with the 6-item fallback
        let short: Vec<u32> = (100..106).collect();
        assert_eq!(0, carousel.current_index(short.len()));
        assert_eq!(&short[..], carousel.current_page(&short));

        carousel.advance(short.len());
        assert_eq!(0, carousel.current_index(short.len()));
    }

    #[test]
    fn test_refresh_keeps_index() {
        let mut carousel = Carousel::new(6);
        carousel.advance(18);
        assert_eq!(1, carousel.current_index(15));
    }
}
