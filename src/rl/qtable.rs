use serde::{Deserialize, Serialize};

use super::encoder::StateId;

/// Dense table of action-value estimates
///
/// Conceptually an array of shape `dims x action_count`, stored flat in
/// row-major order and zero-initialized. The shape is fixed at construction;
/// the only mutation is the TD(0) update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    dims: Vec<usize>,
    action_count: usize,
    values: Vec<f32>,
}

impl QTable {
    /// Create a zero-initialized table for the given state shape
    pub fn new(dims: Vec<usize>, action_count: usize) -> Self {
        let state_count: usize = dims.iter().product();
        Self {
            values: vec![0.0; state_count * action_count],
            dims,
            action_count,
        }
    }

    /// Rebuild a table from previously persisted parts
    pub fn from_parts(dims: Vec<usize>, action_count: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), dims.iter().product::<usize>() * action_count);
        Self {
            dims,
            action_count,
            values,
        }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    pub fn state_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Flat view of all values, for persistence
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Action-value row for one state
    pub fn row(&self, state: StateId) -> &[f32] {
        let start = state.0 * self.action_count;
        &self.values[start..start + self.action_count]
    }

    /// Single action-value estimate
    pub fn get(&self, state: StateId, action: usize) -> f32 {
        self.row(state)[action]
    }

    /// Greedy action for a state, ties broken by lowest action index
    pub fn best_action(&self, state: StateId) -> usize {
        let row = self.row(state);
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// Largest action-value for a state
    pub fn max_value(&self, state: StateId) -> f32 {
        self.row(state)[self.best_action(state)]
    }

    /// TD(0) update; returns the TD error applied
    ///
    /// `Q[s,a] += alpha * (r + gamma * max_a' Q[s',a'] - Q[s,a])`
    pub fn update(
        &mut self,
        state: StateId,
        action: usize,
        reward: f32,
        next_state: StateId,
        alpha: f32,
        gamma: f32,
    ) -> f32 {
        let target = reward + gamma * self.max_value(next_state);
        let index = state.0 * self.action_count + action;
        let td_error = target - self.values[index];
        self.values[index] += alpha * td_error;
        td_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> QTable {
        QTable::new(vec![4, 4], 4)
    }

    #[test]
    fn test_zero_initialized() {
        let table = table();
        assert_eq!(table.state_count(), 16);
        assert_eq!(table.values().len(), 64);
        assert!(table.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_best_action_tiebreak_lowest_index() {
        let table = table();
        // All zeros: lowest index wins.
        assert_eq!(table.best_action(StateId(3)), 0);

        let mut table = table;
        table.update(StateId(3), 2, 1.0, StateId(0), 1.0, 0.0);
        assert_eq!(table.best_action(StateId(3)), 2);
    }

    #[test]
    fn test_td_update_formula() {
        let mut table = table();
        let s = StateId(1);
        let next = StateId(2);

        // Seed Q[next] so max_a' Q[next, a'] = 2.0.
        table.update(next, 1, 2.0, StateId(0), 1.0, 0.0);
        assert_eq!(table.max_value(next), 2.0);

        // Q[s, 0] starts at 0; target = 1 + 0.9 * 2.0 = 2.8.
        let td_error = table.update(s, 0, 1.0, next, 0.1, 0.9);
        assert!((td_error - 2.8).abs() < 1e-6);
        let expected = 0.0 + 0.1 * (1.0 + 0.9 * 2.0 - 0.0);
        assert!((table.get(s, 0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_update_touches_single_entry() {
        let mut table = table();
        table.update(StateId(5), 3, 1.0, StateId(5), 0.5, 0.9);
        let touched = table
            .values()
            .iter()
            .filter(|&&v| v != 0.0)
            .count();
        assert_eq!(touched, 1);
    }

    #[test]
    fn test_from_parts_round_trip() {
        let mut original = table();
        original.update(StateId(0), 1, 3.0, StateId(1), 0.5, 0.9);

        let rebuilt = QTable::from_parts(
            original.dims().to_vec(),
            original.action_count(),
            original.values().to_vec(),
        );
        assert_eq!(rebuilt.get(StateId(0), 1), original.get(StateId(0), 1));
    }
}
