//! Property tests for snapshot directory naming.

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use hoist::domain::value_objects::{Revision, SnapshotName};

fn revision() -> impl Strategy<Value = Revision> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,24}")
        .unwrap()
        .prop_filter("dots only", |s| !s.chars().all(|c| c == '.'))
        .prop_map(|s| Revision::parse(&s).unwrap())
}

/// Seconds between 2000-01-01 and 2100-01-01
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| DateTime::from_timestamp(secs, nanos).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: names sort in the order their snapshots were taken.
    #[test]
    fn property_name_order_is_chronological(
        a in instant(),
        b in instant(),
        rev_a in revision(),
        rev_b in revision(),
    ) {
        let name_a = SnapshotName::new(a, rev_a).dir_name();
        let name_b = SnapshotName::new(b, rev_b).dir_name();

        let secs_a = a.timestamp();
        let secs_b = b.timestamp();
        if secs_a < secs_b {
            prop_assert!(name_a < name_b, "{} !< {}", name_a, name_b);
        } else if secs_a > secs_b {
            prop_assert!(name_a > name_b, "{} !> {}", name_a, name_b);
        }
    }

    /// PROPERTY: a directory name parses back to the same timestamp and revision.
    #[test]
    fn property_dir_name_parses_back(at in instant(), rev in revision()) {
        let name = SnapshotName::new(at, rev.clone());

        let parsed = SnapshotName::parse(&name.dir_name()).unwrap();

        prop_assert_eq!(parsed.timestamp().timestamp(), at.timestamp());
        prop_assert_eq!(parsed.revision(), &rev);
        prop_assert_eq!(parsed, name);
    }
}
