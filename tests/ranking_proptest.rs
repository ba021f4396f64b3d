use handset::analytics::rank_by_partition;
use polars::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;

const SYSTEMS: [&str; 3] = ["iOS", "Android", "KaiOS"];

type Phone = (usize, i64, i64, String);

fn phone() -> impl Strategy<Value = Phone> {
    (0..SYSTEMS.len(), 0_i64..4, 0_i64..4, "[A-C]{1,2}")
}

fn catalog(phones: &[Phone]) -> DataFrame {
    let os: Vec<&str> = phones.iter().map(|p| SYSTEMS[p.0]).collect();
    let storage: Vec<i64> = phones.iter().map(|p| p.1 * 64).collect();
    let battery: Vec<i64> = phones.iter().map(|p| 3000 + p.2 * 500).collect();
    let processor: Vec<&str> = phones.iter().map(|p| p.3.as_str()).collect();
    let model: Vec<String> = (0..phones.len()).map(|i| format!("M{i}")).collect();

    DataFrame::new(vec![
        Column::new("model".into(), model),
        Column::new("storage".into(), storage),
        Column::new("batteryCapacity".into(), battery),
        Column::new("processor".into(), processor),
        Column::new("operatingSystem".into(), os),
    ])
    .expect("generated columns share a length")
}

proptest! {
    #[test]
    fn ranks_are_dense_and_ordered_per_system(phones in prop::collection::vec(phone(), 0..40)) {
        let ranked = rank_by_partition(&catalog(&phones)).expect("ranking succeeds");
        prop_assert_eq!(ranked.height(), phones.len());

        let rank = ranked.column("rank").expect("rank").as_materialized_series().idx().expect("idx").clone();
        let os = ranked.column("operatingSystem").expect("os").as_materialized_series().str().expect("str").clone();
        let storage = ranked.column("storage").expect("storage").as_materialized_series().i64().expect("i64").clone();
        let battery = ranked.column("batteryCapacity").expect("battery").as_materialized_series().i64().expect("i64").clone();
        let processor = ranked.column("processor").expect("cpu").as_materialized_series().str().expect("str").clone();

        let mut seen: HashMap<String, (IdxSize, (i64, i64, String))> = HashMap::new();
        for i in 0..ranked.height() {
            let system = os.get(i).expect("os set").to_owned();
            let r = rank.get(i).expect("rank set");
            let key = (
                storage.get(i).expect("storage set"),
                battery.get(i).expect("battery set"),
                processor.get(i).expect("cpu set").to_owned(),
            );
            match seen.get(&system) {
                None => prop_assert_eq!(r, 1),
                Some((previous_rank, previous_key)) => {
                    prop_assert_eq!(r, previous_rank + 1);
                    prop_assert!(previous_key >= &key, "{key:?} ranked below smaller {previous_key:?}");
                }
            }
            seen.insert(system, (r, key));
        }

        for (system, (last_rank, _)) in &seen {
            let expected = phones.iter().filter(|p| SYSTEMS[p.0] == system.as_str()).count();
            prop_assert_eq!(*last_rank as usize, expected);
        }
    }
}
