#![no_main]

use jobatlas::aggregate::compare;
use jobatlas::model::ComparisonQuery;
use jobatlas::rollup::rollup_frames;
use jobatlas::schema::TableKind;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes may fail to load but must never panic, and whatever
    // loads must survive the downstream queries.
    for kind in TableKind::ALL {
        let Ok(table) = jobatlas::loader::read_table(kind, Cursor::new(data)) else {
            continue;
        };

        let entities = table.entities();
        if let (Some((first, _)), Some((last, _))) = (entities.first(), entities.last()) {
            let _ = compare(table.rows(), &ComparisonQuery::new(first, last));
        }
        if kind == TableKind::Density {
            let _ = rollup_frames(table.rows(), None, Default::default());
        }
    }
});
