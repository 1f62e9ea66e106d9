pub mod dependency_selector;
pub mod graph_view;

pub use dependency_selector::DependencySelector;
pub use graph_view::GraphView;
