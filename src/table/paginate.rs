/// The `page`-th window (1-based) of `page_size` items. Pages past the end are empty.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
  let start = page.saturating_sub(1).saturating_mul(page_size);
  if page_size == 0 || start >= items.len() {
    return &[];
  }
  let end = start.saturating_add(page_size).min(items.len());
  &items[start..end]
}

pub fn page_count(total: usize, page_size: usize) -> usize {
  if page_size == 0 {
    return 0;
  }
  total.div_ceil(page_size)
}
