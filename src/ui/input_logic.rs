/// Move a selection cursor one row up, wrapping to the last row.
pub fn select_prev(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    (selected % item_count + item_count - 1) % item_count
}

/// Move a selection cursor one row down, wrapping to the first row.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    (selected + 1) % item_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_at_both_ends() {
        assert_eq!(select_prev(0, 3), 2);
        assert_eq!(select_prev(2, 3), 1);
        assert_eq!(select_next(2, 3), 0);
        assert_eq!(select_next(0, 3), 1);
    }

    #[test]
    fn single_row_stays_put() {
        assert_eq!(select_next(0, 1), 0);
        assert_eq!(select_prev(0, 1), 0);
    }

    #[test]
    fn empty_list_is_harmless() {
        assert_eq!(select_next(0, 0), 0);
        assert_eq!(select_prev(0, 0), 0);
    }
}
