use combinadic::{combinations, permutations};

#[test]
fn combinations_in_head_first_order() {
    let result: Vec<Vec<&str>> = combinations(&["a", "b", "c"], 2).collect();
    assert_eq!(result, [["a", "b"], ["a", "c"], ["b", "c"]]);
}

#[test]
fn permutations_in_head_first_order() {
    let result: Vec<Vec<&str>> = permutations(&["a", "b", "c"], 2).collect();
    assert_eq!(
        result,
        [
            ["a", "b"],
            ["a", "c"],
            ["b", "a"],
            ["b", "c"],
            ["c", "a"],
            ["c", "b"],
        ]
    );
}

#[test]
fn counts_follow_the_formulas() {
    let items: Vec<char> = "abcdefg".chars().collect();
    assert_eq!(combinations(&items, 3).count(), 35);
    assert_eq!(permutations(&items, 3).count(), 210);
    assert_eq!(permutations(&items, 7).count(), 5_040);
}

#[test]
fn stopping_early_is_cheap() {
    let items: Vec<u64> = (0..1_000).collect();
    let first_three: Vec<Vec<u64>> = permutations(&items, 5).take(3).collect();
    assert_eq!(
        first_three,
        [[0, 1, 2, 3, 4], [0, 1, 2, 3, 5], [0, 1, 2, 3, 6]]
    );
}
