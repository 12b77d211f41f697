use super::model::GraphModel;

/// Weighted adjacency matrix of a model snapshot, rows and columns in node
/// insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyMatrix {
	pub labels: Vec<String>,
	pub cells: Vec<Vec<f64>>,
}

impl AdjacencyMatrix {
	/// Cell `(i, j)` sums the weights of edges `i -> j`; undirected edges are
	/// mirrored into `(j, i)` unless they are loops.
	pub fn build(model: &GraphModel) -> Self {
		let n = model.nodes().len();
		let mut cells = vec![vec![0.0; n]; n];
		for edge in model.edges() {
			let (Some(i), Some(j)) = (model.index_of(edge.from), model.index_of(edge.to)) else {
				continue;
			};
			cells[i][j] += edge.weight;
			if !edge.directed && i != j {
				cells[j][i] += edge.weight;
			}
		}
		Self {
			labels: model.nodes().iter().map(|n| n.label.clone()).collect(),
			cells,
		}
	}

	pub fn len(&self) -> usize {
		self.labels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}

	pub fn row_sums(&self) -> Vec<f64> {
		self.cells.iter().map(|row| row.iter().sum()).collect()
	}

	pub fn column_sums(&self) -> Vec<f64> {
		(0..self.len())
			.map(|j| self.cells.iter().map(|row| row[j]).sum())
			.collect()
	}

	pub fn nonzero_counts(&self) -> Vec<usize> {
		self.cells
			.iter()
			.map(|row| row.iter().filter(|&&w| w != 0.0).count())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::graph_editor::geometry::Point;

	#[test]
	fn mixed_directed_and_undirected_edges() {
		let mut m = GraphModel::with_rng(1.0, StdRng::seed_from_u64(9));
		let a = m.add_node(Point::new(0.0, 0.0), "A").unwrap();
		let b = m.add_node(Point::new(100.0, 0.0), "B").unwrap();
		let c = m.add_node(Point::new(0.0, 100.0), "C").unwrap();
		m.add_edge(a, b, 2.0, true).unwrap();
		m.add_edge(b, a, 3.0, true).unwrap();
		m.add_edge(a, c, 1.0, false).unwrap();

		let mx = AdjacencyMatrix::build(&m);
		assert_eq!(mx.labels, ["A", "B", "C"]);
		assert_eq!(mx.cells, vec![
			vec![0.0, 2.0, 1.0],
			vec![3.0, 0.0, 0.0],
			vec![1.0, 0.0, 0.0],
		]);
		assert_eq!(mx.row_sums(), [3.0, 3.0, 1.0]);
		assert_eq!(mx.column_sums(), [4.0, 2.0, 1.0]);
		assert_eq!(mx.nonzero_counts(), [2, 1, 1]);
	}

	#[test]
	fn undirected_loop_is_not_doubled() {
		let mut m = GraphModel::with_rng(1.0, StdRng::seed_from_u64(9));
		let a = m.add_node(Point::new(0.0, 0.0), "A").unwrap();
		m.add_edge(a, a, 4.0, false).unwrap();
		assert_eq!(AdjacencyMatrix::build(&m).cells, vec![vec![4.0]]);
	}

	#[test]
	fn indices_follow_current_node_order() {
		let mut m = GraphModel::with_rng(1.0, StdRng::seed_from_u64(9));
		let a = m.add_node(Point::new(0.0, 0.0), "A").unwrap();
		let b = m.add_node(Point::new(100.0, 0.0), "B").unwrap();
		let c = m.add_node(Point::new(200.0, 0.0), "C").unwrap();
		m.add_edge(b, c, 7.0, true).unwrap();
		m.delete_node(a).unwrap();

		let mx = AdjacencyMatrix::build(&m);
		assert_eq!(mx.len(), 2);
		assert_eq!(mx.cells[0][1], 7.0);
		assert!(AdjacencyMatrix::build(&GraphModel::with_rng(1.0, StdRng::seed_from_u64(0))).is_empty());
	}
}
