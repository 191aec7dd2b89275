//! The three-pass provenance merge.
//!
//! 1. **Transform** every record into its `File` / `FormalParameter` pair.
//! 2. **Reconcile** the pairs against the graph in record order: unknown
//!    files are appended (with their parameter, once per parameter id),
//!    known files get `dateCreated` and `url` refreshed in place.
//! 3. **Patch** the workflow node (`output` replaced, `creator` set) and the
//!    root dataset (`hasPart` appended).
//!
//! The singleton lookups, record validation and strict duplicate checks all
//! run before the first mutation, so every error leaves the graph as it was.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info, warn};
use wrroc_types::vocab::{KEY_CREATOR, KEY_DATE_CREATED, KEY_HAS_PART, KEY_OUTPUT, KEY_URL};
use wrroc_types::{id_ref, FileProvenanceRecord, Graph, Node};

use crate::entity::ProvenanceEntities;
use crate::error::{MergeError, MergeResult};
use crate::options::MergeOptions;
use crate::report::MergeReport;

/// Merges workflow-run provenance into RO-Crate metadata graphs.
///
/// Stateless apart from its options; one merger can serve any number of
/// graphs. Two merges into the same graph must not overlap, which the
/// `&mut Graph` borrow already guarantees.
#[derive(Clone, Debug, Default)]
pub struct ProvenanceMerger {
    options: MergeOptions,
}

impl ProvenanceMerger {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `records` into `graph` in place.
    ///
    /// `base_url` is prefixed verbatim to each file name to form its `url`;
    /// `acting_user` becomes the workflow's `creator`.
    pub fn merge(
        &self,
        graph: &mut Graph,
        records: &[FileProvenanceRecord],
        base_url: &str,
        acting_user: &str,
    ) -> MergeResult<MergeReport> {
        let (workflow_id, workflow_pos) = self.locate_workflow(graph)?;
        let root_pos = self.locate_root(graph)?;

        let candidates = records
            .iter()
            .enumerate()
            .map(|(index, record)| ProvenanceEntities::from_record(index, record, base_url))
            .collect::<MergeResult<Vec<_>>>()?;

        if self.options.strict_ids {
            reject_ambiguous(graph, &candidates)?;
        }

        let mut report = MergeReport::new(workflow_id);
        reconcile(graph, candidates, &mut report)?;
        patch(graph, workflow_pos, root_pos, &report, acting_user)?;

        info!(
            workflow = %report.workflow_id,
            new_files = report.new_file_ids.len(),
            outputs = report.new_param_ids.len(),
            refreshed = report.updated_ids.len(),
            "merged provenance"
        );
        Ok(report)
    }

    /// Find the single node whose id ends with the workflow suffix.
    fn locate_workflow(&self, graph: &Graph) -> MergeResult<(String, usize)> {
        let suffix = &self.options.workflow_suffix;
        match graph.ids_with_suffix(suffix).as_slice() {
            [] => Err(MergeError::MalformedGraph(format!(
                "no workflow node with an @id ending in {suffix}"
            ))),
            [id] => {
                let position = single_position(graph, id, "workflow")?;
                Ok((id.to_string(), position))
            }
            many => Err(MergeError::MalformedGraph(format!(
                "{} workflow nodes end in {suffix}: {}",
                many.len(),
                many.join(", ")
            ))),
        }
    }

    fn locate_root(&self, graph: &Graph) -> MergeResult<usize> {
        single_position(graph, &self.options.root_id, "root")
    }
}

/// Merge with default options, consuming and returning the graph.
pub fn merge(
    mut graph: Graph,
    records: &[FileProvenanceRecord],
    base_url: &str,
    acting_user: &str,
) -> MergeResult<Graph> {
    ProvenanceMerger::default().merge(&mut graph, records, base_url, acting_user)?;
    Ok(graph)
}

fn single_position(graph: &Graph, id: &str, role: &str) -> MergeResult<usize> {
    match graph.positions(id) {
        [position] => Ok(*position),
        [] => Err(MergeError::MalformedGraph(format!(
            "no {role} node with @id {id}"
        ))),
        many => Err(MergeError::MalformedGraph(format!(
            "{} {role} nodes share @id {id}",
            many.len()
        ))),
    }
}

fn reject_ambiguous(graph: &Graph, candidates: &[ProvenanceEntities]) -> MergeResult<()> {
    for entities in candidates {
        let count = graph.positions(&entities.file_id).len();
        if count > 1 {
            return Err(MergeError::DuplicateId {
                id: entities.file_id.clone(),
                count,
            });
        }
    }
    Ok(())
}

fn reconcile(
    graph: &mut Graph,
    candidates: Vec<ProvenanceEntities>,
    report: &mut MergeReport,
) -> MergeResult<()> {
    let mut appended_params: HashSet<String> = HashSet::new();

    for entities in candidates {
        if graph.contains(&entities.file_id) {
            refresh_existing(graph, &entities);
            report.updated_ids.push(entities.file_id);
            continue;
        }

        debug!(id = %entities.file_id, parameter = %entities.parameter_id, "appending file");
        graph.push(entities.file)?;
        report.new_file_ids.push(entities.file_id);

        if appended_params.insert(entities.parameter_id.clone()) {
            // A parameter left by an earlier run is still one of this run's outputs.
            if graph.contains(&entities.parameter_id) {
                debug!(parameter = %entities.parameter_id, "parameter already described");
            } else {
                graph.push(entities.parameter)?;
            }
            report.new_param_ids.push(entities.parameter_id);
        }
    }
    Ok(())
}

fn refresh_existing(graph: &mut Graph, entities: &ProvenanceEntities) {
    let positions = graph.positions(&entities.file_id);
    let (position, count) = (positions[0], positions.len());
    if count > 1 {
        warn!(id = %entities.file_id, count, "several nodes share this id; refreshing the first");
    }
    debug!(id = %entities.file_id, "refreshing existing file");
    if let Some(node) = graph.node_at_mut(position) {
        node.set(KEY_DATE_CREATED, entities.date_created());
        node.set(KEY_URL, entities.url());
    }
}

fn patch(
    graph: &mut Graph,
    workflow_pos: usize,
    root_pos: usize,
    report: &MergeReport,
    acting_user: &str,
) -> MergeResult<()> {
    let outputs: Vec<Value> = report.new_param_ids.iter().map(|id| id_ref(id)).collect();
    let workflow = graph
        .node_at_mut(workflow_pos)
        .ok_or_else(|| MergeError::MalformedGraph("workflow node vanished".into()))?;
    workflow.set(KEY_OUTPUT, Value::Array(outputs));
    workflow.set(KEY_CREATOR, id_ref(acting_user));

    if report.new_file_ids.is_empty() {
        return Ok(());
    }
    let root = graph
        .node_at_mut(root_pos)
        .ok_or_else(|| MergeError::MalformedGraph("root node vanished".into()))?;
    append_parts(root, &report.new_file_ids);
    Ok(())
}

/// Append `{@id}` references to `hasPart`, creating the list if absent and
/// promoting a lone reference object to a list.
fn append_parts(root: &mut Node, file_ids: &[String]) {
    let mut parts = match root.get(KEY_HAS_PART) {
        Some(Value::Array(existing)) => existing.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single.clone()],
    };
    parts.extend(file_ids.iter().map(|id| id_ref(id)));
    root.set(KEY_HAS_PART, Value::Array(parts));
}
