//! Algorithm Vocabulary
//!
//! The fixed set of C++ standard algorithm names recognized by the counter.
//! Vocabulary order is significant: result records break count ties by the
//! position of the name in this list.

/// Every `<algorithm>` / `<numeric>` function name we count, grouped the way
/// the standard groups them.
pub const VOCABULARY: &[&str] = &[
    // Non-modifying sequence operations
    "all_of",
    "any_of",
    "none_of",
    "for_each",
    "count",
    "count_if",
    "mismatch",
    "equal",
    "find",
    "find_if",
    "find_if_not",
    "find_end",
    "find_first_of",
    "adjacent_find",
    "search",
    "search_n",
    // Modifying sequence operations
    "copy",
    "copy_if",
    "copy_n",
    "copy_backward",
    "move",
    "move_backward",
    "fill",
    "fill_n",
    "transform",
    "generate",
    "generate_n",
    "remove",
    "remove_if",
    "remove_copy",
    "remove_copy_if",
    "replace",
    "replace_if",
    "replace_copy",
    "replace_copy_if",
    "swap",
    "swap_ranges",
    "iter_swap",
    "reverse",
    "reverse_copy",
    "rotate",
    "rotate_copy",
    "random_shuffle",
    "shuffle",
    "unique",
    "unique_copy",
    // Partitioning operations
    "is_partitioned",
    "partition",
    "partition_copy",
    "stable_partition",
    "partition_point",
    // Sorting operations
    "is_sorted",
    "is_sorted_until",
    "sort",
    "partial_sort",
    "partial_sort_copy",
    "stable_sort",
    "nth_element",
    // Binary search operations on sorted ranges
    "lower_bound",
    "upper_bound",
    "binary_search",
    "equal_range",
    // Set operations on sorted ranges
    "merge",
    "inplace_merge",
    "includes",
    "set_difference",
    "set_intersection",
    "set_symmetric_difference",
    "set_union",
    // Heap operations
    "is_heap",
    "is_heap_until",
    "make_heap",
    "push_heap",
    "pop_heap",
    "sort_heap",
    // Minimum/maximum operations
    "max",
    "max_element",
    "min",
    "min_element",
    "minmax",
    "minmax_element",
    "lexicographical_compare",
    "is_permutation",
    "next_permutation",
    "prev_permutation",
    // Numeric operations
    "iota",
    "accumulate",
    "inner_product",
    "adjacent_difference",
    "partial_sum",
];

/// Position of `name` in the vocabulary, if it is a known pattern
pub fn index_of(name: &str) -> Option<usize> {
    VOCABULARY.iter().position(|&entry| entry == name)
}
