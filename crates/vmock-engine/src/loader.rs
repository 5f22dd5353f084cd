//! Loader — turns a [`MockRegistry`] plus broker metadata into runtime state.
//!
//! Validation is per-declaration and forgiving: a bad declaration (duplicate
//! path, no metadata from the data source, animation on a discrete type)
//! skips that datapoint with a warning instead of failing the whole load, so
//! one typo doesn't take the rest of the mock down.

use rustc_hash::FxHashMap;
use tracing::warn;

use vmock_behavior::Behavior;
use vmock_broker::Metadata;
use vmock_core::{DataType, DatapointId, MockResult};

use crate::registry::MockRegistry;
use crate::table::DatapointTable;

/// A loaded mocked datapoint: its table slot plus its runtime behaviors.
#[derive(Debug)]
pub struct MockedDatapoint {
    pub id: DatapointId,
    pub path: String,
    pub behaviors: Vec<Behavior>,
}

/// Result of a load: the table (mocked + referenced entries) and the mocks
/// in declaration order.
#[derive(Debug)]
pub struct Loaded {
    pub table: DatapointTable,
    pub mocks: Vec<MockedDatapoint>,
}

/// Validate the declarations against `metadata` and build the runtime state.
///
/// Paths referenced by behaviors but not themselves mocked get an unmocked
/// table entry (declared type from metadata, else [`DataType::Unknown`], no
/// value until the data source delivers one) so `$<path>` expressions and
/// cross-path triggers can resolve against the table.
pub fn load(registry: MockRegistry, metadata: &[Metadata]) -> MockResult<Loaded> {
    let meta_index: FxHashMap<&str, &Metadata> =
        metadata.iter().map(|m| (m.path.as_str(), m)).collect();

    let mut table = DatapointTable::new();
    let mut mocks = Vec::new();

    for spec in registry.into_specs() {
        if table.id_of(&spec.path).is_some() {
            warn!(
                path = %spec.path,
                "datapoint declared more than once; keeping the first declaration"
            );
            continue;
        }
        let Some(meta) = meta_index.get(spec.path.as_str()) else {
            warn!(
                path = %spec.path,
                "data source has no metadata for datapoint; skipping"
            );
            continue;
        };
        if meta.data_type.is_discrete()
            && spec.behaviors.iter().any(|b| b.action().animates())
        {
            warn!(
                path = %spec.path,
                data_type = %meta.data_type,
                "animation declared on a discrete datapoint; skipping"
            );
            continue;
        }

        let id = table.insert(
            spec.path.clone(),
            meta.data_type,
            Some(spec.initial_value),
            true,
        )?;
        mocks.push(MockedDatapoint {
            id,
            path: spec.path,
            behaviors: spec.behaviors,
        });
    }

    // Referenced-but-not-mocked paths.
    for mock in &mocks {
        let referenced: Vec<String> = mock
            .behaviors
            .iter()
            .flat_map(|b| b.referenced_paths())
            .map(str::to_string)
            .collect();
        for path in referenced {
            if table.id_of(&path).is_some() {
                continue;
            }
            let data_type = match meta_index.get(path.as_str()) {
                Some(meta) => meta.data_type,
                None => {
                    warn!(path = %path, "referenced datapoint has no metadata; type unknown");
                    DataType::Unknown
                }
            };
            table.insert(path, data_type, None, false)?;
        }
    }

    Ok(Loaded { table, mocks })
}
