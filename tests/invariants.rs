use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use weighted_rs::{LinearSelector, Selector, WeightedSelector};

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u32),
    Remove(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..8, 1u32..1000).prop_map(|(item, weight)| Op::Insert(item, weight)),
        3 => (0u8..8).prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn blocks_tile_total_weight(ops in prop::collection::vec(op_strategy(), 0..64), seed in any::<u64>()) {
        let mut tree = WeightedSelector::new();
        let mut linear = LinearSelector::new();
        let mut model: Vec<(u8, u32)> = vec![];
        let mut rng = StdRng::seed_from_u64(seed);

        for op in ops {
            match op {
                Op::Insert(item, weight) => {
                    tree.insert(item, weight).unwrap();
                    linear.insert(item, weight).unwrap();
                    model.push((item, weight));
                }
                Op::Remove(item) => {
                    let present = model.iter().any(|(existing, _)| *existing == item);
                    prop_assert_eq!(tree.remove(&item), present);
                    prop_assert_eq!(linear.remove(&item), present);
                    model.retain(|(existing, _)| *existing != item);
                }
                Op::Clear => {
                    tree.clear();
                    linear.clear();
                    model.clear();
                }
            }

            let model_total: u64 = model.iter().map(|(_, weight)| u64::from(*weight)).sum();
            prop_assert_eq!(tree.total_probability(), model_total);
            prop_assert_eq!(linear.total_probability(), model_total);
            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(linear.len(), model.len());

            // Blocks are in insertion order and packed from 1
            let mut expected_start = 1u64;
            for (entry, (item, weight)) in tree.iter().zip(model.iter()) {
                prop_assert_eq!(entry.item, item);
                prop_assert_eq!(entry.weight, *weight);
                prop_assert_eq!(*entry.block.start(), expected_start);
                expected_start += u64::from(*weight);
                prop_assert_eq!(*entry.block.end(), expected_start - 1);
            }
            prop_assert_eq!(expected_start - 1, model_total);

            if model.is_empty() {
                prop_assert!(tree.select_with(&mut rng).is_err());
                prop_assert!(linear.select_with(&mut rng).is_err());
            } else {
                let picked = *tree.select_with(&mut rng).unwrap();
                prop_assert!(tree.contains(&picked));
                let picked = *linear.select_with(&mut rng).unwrap();
                prop_assert!(linear.contains(&picked));
            }
        }
    }

    #[test]
    fn zero_weight_changes_nothing(weights in prop::collection::vec(1u32..100, 0..16)) {
        let mut tree = WeightedSelector::try_from_iter(weights.iter().map(|w| (*w, *w))).unwrap();
        let before: Vec<_> = tree.iter().map(|entry| entry.block).collect();
        prop_assert!(tree.insert(0, 0).is_err());
        let after: Vec<_> = tree.iter().map(|entry| entry.block).collect();
        prop_assert_eq!(before, after);
        prop_assert!(!tree.contains(&0));
    }
}
