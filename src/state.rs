use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::data::filter::derive_view;
use crate::data::model::PenguinDataset;
use crate::reactive::graph::{DependencyGraph, GraphError};
use crate::reactive::input::{InputEvent, InputId, InputState};
use crate::render::histogram::HistogramData;
use crate::render::scatter::ScatterData;
use crate::render::summary::SummaryTable;
use crate::render::table::DataTableView;

// ---------------------------------------------------------------------------
// Dashboard graph
// ---------------------------------------------------------------------------

/// Everything the dashboard computes from the dataset and the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    FilteredView,
    Histogram,
    Scatterplot,
    DataTable,
    SummaryTable,
}

/// Declares what each node reads.
pub fn dashboard_graph() -> Result<DependencyGraph<NodeId, InputId>, GraphError> {
    use crate::reactive::graph::Dependency::{Input, Node};

    DependencyGraph::builder()
        .node(NodeId::FilteredView, [Input(InputId::SelectedSpecies)])
        .node(
            NodeId::Histogram,
            [
                Node(NodeId::FilteredView),
                Input(InputId::SelectedAttribute),
                Input(InputId::BinCount),
            ],
        )
        .node(NodeId::Scatterplot, [Node(NodeId::FilteredView)])
        .node(NodeId::DataTable, [Node(NodeId::FilteredView)])
        // Reads the full dataset only: the species filter does not apply.
        .node(NodeId::SummaryTable, [])
        .build()
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// One session's inputs and every output derived from them.
pub struct DashboardState {
    /// Full dataset, shared read-only.
    dataset: Arc<PenguinDataset>,

    /// Current control values.
    inputs: InputState,

    graph: DependencyGraph<NodeId, InputId>,

    /// Rows whose species is selected.
    pub filtered: PenguinDataset,
    pub histogram: HistogramData,
    pub scatter: ScatterData,
    pub table: DataTableView,
    pub summary: SummaryTable,

    /// How many times each node has been computed.
    generations: BTreeMap<NodeId, u64>,
}

impl DashboardState {
    /// Build the session and compute every node once.
    pub fn new(dataset: Arc<PenguinDataset>, page_size: usize) -> Result<Self, GraphError> {
        let mut state = Self {
            dataset,
            inputs: InputState::default(),
            graph: dashboard_graph()?,
            filtered: PenguinDataset::default(),
            histogram: HistogramData::default(),
            scatter: ScatterData::default(),
            table: DataTableView::new(page_size),
            summary: SummaryTable::default(),
            generations: BTreeMap::new(),
        };
        let all = state.graph.topological_order().to_vec();
        for node in all {
            state.recompute(node);
        }
        Ok(state)
    }

    pub fn dataset(&self) -> &PenguinDataset {
        &self.dataset
    }

    pub fn inputs(&self) -> &InputState {
        &self.inputs
    }

    pub fn generation(&self, node: NodeId) -> u64 {
        self.generations.get(&node).copied().unwrap_or(0)
    }

    /// Apply a frame's worth of events, then recompute each affected node
    /// once, upstream first. Returns the recomputed nodes in order.
    pub fn dispatch_all(&mut self, events: impl IntoIterator<Item = InputEvent>) -> Vec<NodeId> {
        let changed: BTreeSet<InputId> = events
            .into_iter()
            .filter_map(|event| self.inputs.apply(event))
            .collect();
        if changed.is_empty() {
            return Vec::new();
        }

        let affected = self.graph.affected_by(&changed);
        log::debug!("inputs {changed:?} changed, recomputing {affected:?}");
        for &node in &affected {
            self.recompute(node);
        }
        affected
    }

    fn recompute(&mut self, node: NodeId) {
        match node {
            NodeId::FilteredView => {
                self.filtered = derive_view(&self.dataset, self.inputs.selected_species());
            }
            NodeId::Histogram => {
                self.histogram = HistogramData::build(
                    &self.filtered,
                    self.inputs.selected_attribute(),
                    self.inputs.bin_count(),
                );
            }
            NodeId::Scatterplot => {
                self.scatter = ScatterData::build(&self.filtered);
            }
            NodeId::DataTable => {
                self.table.refresh(&self.filtered);
            }
            NodeId::SummaryTable => {
                self.summary = SummaryTable::describe(&self.dataset);
            }
        }
        *self.generations.entry(node).or_default() += 1;
        log::debug!("{node:?} at generation {}", self.generation(node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::small_dataset;
    use crate::data::loader::load_penguins;
    use crate::data::model::{Attribute, Species};
    use crate::render::table::DEFAULT_PAGE_SIZE;
    use pretty_assertions::assert_eq;

    fn state() -> DashboardState {
        DashboardState::new(Arc::new(small_dataset()), DEFAULT_PAGE_SIZE).unwrap()
    }

    #[test]
    fn graph_orders_filtered_view_first() {
        let graph = dashboard_graph().unwrap();
        assert_eq!(graph.topological_order()[0], NodeId::FilteredView);
    }

    #[test]
    fn initial_state_computes_every_node_once() {
        let state = state();
        for node in [
            NodeId::FilteredView,
            NodeId::Histogram,
            NodeId::Scatterplot,
            NodeId::DataTable,
            NodeId::SummaryTable,
        ] {
            assert_eq!(state.generation(node), 1, "{node:?}");
        }
        // Default selection is Adelie only.
        assert_eq!(state.filtered.len(), 3);
        assert_eq!(state.table.len(), 3);
        assert_eq!(state.histogram.total(), 3);
    }

    #[test]
    fn bin_count_only_touches_the_histogram() {
        let mut state = state();
        let filtered = state.filtered.clone();
        let scatter = state.scatter.clone();
        let summary = state.summary.clone();

        let recomputed = state.dispatch_all([InputEvent::SetBinCount(3)]);
        assert_eq!(recomputed, vec![NodeId::Histogram]);
        assert_eq!(state.histogram.bins.len(), 3);
        assert_eq!(state.filtered, filtered);
        assert_eq!(state.scatter, scatter);
        assert_eq!(state.summary, summary);
        assert_eq!(state.generation(NodeId::DataTable), 1);
    }

    #[test]
    fn species_change_recomputes_view_and_dependents_in_order() {
        let mut state = state();
        let gentoo = BTreeSet::from([Species::Gentoo]);
        let recomputed = state.dispatch_all([InputEvent::SetSpecies(gentoo)]);
        assert_eq!(
            recomputed,
            vec![
                NodeId::FilteredView,
                NodeId::Histogram,
                NodeId::Scatterplot,
                NodeId::DataTable
            ]
        );
        assert_eq!(state.filtered.len(), 2);
        assert!(state.filtered.records.iter().all(|r| r.species == Species::Gentoo));
        assert_eq!(state.generation(NodeId::SummaryTable), 1);
    }

    #[test]
    fn attribute_change_skips_the_filter() {
        let mut state = state();
        let recomputed = state.dispatch_all([InputEvent::SelectAttribute(Attribute::BodyMass)]);
        assert_eq!(recomputed, vec![NodeId::Histogram]);
        assert_eq!(state.histogram.attribute, Attribute::BodyMass);
    }

    #[test]
    fn unchanged_events_recompute_nothing() {
        let mut state = state();
        assert!(state.dispatch_all([InputEvent::SetBinCount(1)]).is_empty());
        assert!(state
            .dispatch_all([InputEvent::SetSpeciesSelected(Species::Adelie, true)])
            .is_empty());
        assert_eq!(state.generation(NodeId::Histogram), 1);
    }

    #[test]
    fn batched_events_recompute_each_node_once() {
        let mut state = state();
        let recomputed = state.dispatch_all([
            InputEvent::SetBinCount(4),
            InputEvent::SetSpeciesSelected(Species::Gentoo, true),
            InputEvent::SelectAttribute(Attribute::FlipperLength),
        ]);
        assert_eq!(recomputed.len(), 4);
        assert_eq!(state.generation(NodeId::Histogram), 2);
        assert_eq!(state.filtered.len(), 5);
    }

    #[test]
    fn empty_selection_empties_every_filtered_output() {
        let mut state = state();
        state.dispatch_all([InputEvent::SetSpeciesSelected(Species::Adelie, false)]);
        assert!(state.filtered.is_empty());
        assert!(state.histogram.is_empty());
        assert_eq!(state.scatter.point_count(), 0);
        assert!(state.table.is_empty());
    }

    #[test]
    fn summary_ignores_species_selection() {
        let dataset = Arc::new(load_penguins().unwrap());
        let mut state = DashboardState::new(dataset.clone(), DEFAULT_PAGE_SIZE).unwrap();
        let expected = SummaryTable::describe(&dataset);
        assert_eq!(state.summary, expected);

        for selection in [
            BTreeSet::new(),
            BTreeSet::from([Species::Chinstrap]),
            Species::ALL.into_iter().collect(),
        ] {
            state.dispatch_all([InputEvent::SetSpecies(selection)]);
            assert_eq!(state.summary, expected);
        }
        assert_eq!(state.filtered.len(), dataset.len());
    }
}
