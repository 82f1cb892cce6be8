use hoist::application::SnapshotListing;

pub fn render_snapshots(listing: &[SnapshotListing]) -> String {
    if listing.is_empty() {
        return "No snapshots yet.\n".to_string();
    }

    let mut out = String::new();
    for entry in listing {
        let name = &entry.snapshot.name;
        out.push_str(&format!(
            "{} {}  {}  {}\n",
            if entry.is_deployed { "*" } else { " " },
            name.timestamp().format("%Y-%m-%d %H:%M:%S UTC"),
            name.revision().short(),
            name.dir_name()
        ));
    }
    out
}

pub fn snapshot_json(entry: &SnapshotListing) -> serde_json::Value {
    serde_json::json!({
        "event": "snapshot",
        "name": entry.snapshot.name.dir_name(),
        "revision": entry.snapshot.name.revision().as_str(),
        "timestamp": entry.snapshot.name.timestamp().to_rfc3339(),
        "deployed": entry.is_deployed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoist::infrastructure::SnapshotInfo;
    use hoist::SnapshotName;
    use std::path::PathBuf;

    fn listing(name: &str, is_deployed: bool) -> SnapshotListing {
        SnapshotListing {
            snapshot: SnapshotInfo {
                name: SnapshotName::parse(name).unwrap(),
                path: PathBuf::from("/site/out/snapshots").join(name),
            },
            is_deployed,
        }
    }

    #[test]
    fn deployed_snapshot_is_starred() {
        let out = render_snapshots(&[
            listing("20240101T000000Z-0123456789", false),
            listing("20240102T030405Z-abcdef0123", true),
        ]);

        assert_eq!(
            out,
            "  2024-01-01 00:00:00 UTC  0123456  20240101T000000Z-0123456789\n\
             * 2024-01-02 03:04:05 UTC  abcdef0  20240102T030405Z-abcdef0123\n"
        );
    }

    #[test]
    fn empty_listing_says_so() {
        assert_eq!(render_snapshots(&[]), "No snapshots yet.\n");
    }
}
