//! Two-axis ordinal priority matrices (influence x interest, probability x impact).
//!
//! [`PriorityMatrixBuilder::build`] partitions its input in one pass: every
//! entity lands in exactly one of the nine cells, or, when an axis value is
//! outside `High/Medium/Low`, in the unclassified bucket or a build error,
//! depending on the [`UnclassifiedPolicy`]. Entities are never dropped.

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;
use crate::status::StatusValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdinalAxis {
    High,
    Medium,
    Low,
}

impl OrdinalAxis {
    pub const ORDER: [OrdinalAxis; 3] = [OrdinalAxis::High, OrdinalAxis::Medium, OrdinalAxis::Low];

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Ordinal weight used for exposure scoring: High=3, Medium=2, Low=1.
    #[must_use]
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Anything that can be placed in a matrix and selected by id.
pub trait MatrixEntity {
    fn entity_id(&self) -> &str;
}

/// What to do with an entity whose axis value is out of the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnclassifiedPolicy {
    /// Route it to the unclassified bucket.
    #[default]
    Bucket,
    /// Fail the whole build.
    Reject,
}

impl UnclassifiedPolicy {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bucket" => Some(Self::Bucket),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclassifiedEntity<'a, T> {
    pub entity: &'a T,
    pub axis: &'static str,
    pub raw_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityMatrix<'a, T> {
    axis_a: &'static str,
    axis_b: &'static str,
    cells: [[Vec<&'a T>; 3]; 3],
    unclassified: Vec<UnclassifiedEntity<'a, T>>,
}

impl<'a, T> PriorityMatrix<'a, T> {
    #[must_use]
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        (self.axis_a, self.axis_b)
    }

    #[must_use]
    pub fn bucket(&self, a: OrdinalAxis, b: OrdinalAxis) -> &[&'a T] {
        &self.cells[a.index()][b.index()]
    }

    /// The nine cells in `High..Low x High..Low` order.
    pub fn cells(&self) -> impl Iterator<Item = (OrdinalAxis, OrdinalAxis, &[&'a T])> + '_ {
        OrdinalAxis::ORDER.into_iter().flat_map(move |a| {
            OrdinalAxis::ORDER
                .into_iter()
                .map(move |b| (a, b, self.bucket(a, b)))
        })
    }

    #[must_use]
    pub fn counts(&self) -> [[usize; 3]; 3] {
        let mut counts = [[0usize; 3]; 3];
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                counts[row][col] = cell.len();
            }
        }
        counts
    }

    #[must_use]
    pub fn unclassified(&self) -> &[UnclassifiedEntity<'a, T>] {
        &self.unclassified
    }

    /// Total entities, unclassified included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().map(Vec::len).sum::<usize>() + self.unclassified.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, T: MatrixEntity> PriorityMatrix<'a, T> {
    /// Full record for the selected entity id, if it is on the matrix.
    #[must_use]
    pub fn select(&self, entity_id: &str) -> Option<&'a T> {
        let entity_id = entity_id.trim();
        if entity_id.is_empty() {
            return None;
        }
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .chain(self.unclassified.iter().map(|entry| entry.entity))
            .find(|entity| entity.entity_id() == entity_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityMatrixBuilder {
    axis_a: &'static str,
    axis_b: &'static str,
    policy: UnclassifiedPolicy,
}

impl PriorityMatrixBuilder {
    #[must_use]
    pub fn new(axis_a: &'static str, axis_b: &'static str) -> Self {
        Self {
            axis_a,
            axis_b,
            policy: UnclassifiedPolicy::default(),
        }
    }

    #[must_use]
    pub fn stakeholders() -> Self {
        Self::new("influence", "interest")
    }

    #[must_use]
    pub fn risks() -> Self {
        Self::new("probability", "impact")
    }

    #[must_use]
    pub fn policy(mut self, policy: UnclassifiedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stable single-pass partition of `entities` by two raw axis readings.
    pub fn build<'a, T, A, B>(
        &self,
        entities: &'a [T],
        axis_a: A,
        axis_b: B,
    ) -> Result<PriorityMatrix<'a, T>, MatrixError>
    where
        T: MatrixEntity,
        A: Fn(&T) -> &str,
        B: Fn(&T) -> &str,
    {
        let mut matrix = PriorityMatrix {
            axis_a: self.axis_a,
            axis_b: self.axis_b,
            cells: Default::default(),
            unclassified: Vec::new(),
        };

        for entity in entities {
            let raw_a = axis_a(entity);
            let raw_b = axis_b(entity);
            match (OrdinalAxis::parse(raw_a), OrdinalAxis::parse(raw_b)) {
                (Some(a), Some(b)) => matrix.cells[a.index()][b.index()].push(entity),
                (parsed_a, _) => {
                    let (axis, raw_value) = if parsed_a.is_none() {
                        (self.axis_a, raw_a)
                    } else {
                        (self.axis_b, raw_b)
                    };
                    if self.policy == UnclassifiedPolicy::Reject {
                        return Err(MatrixError::OutOfEnumAxis {
                            entity_id: entity.entity_id().to_owned(),
                            axis,
                            value: raw_value.to_owned(),
                        });
                    }
                    tracing::warn!(
                        entity_id = entity.entity_id(),
                        axis,
                        value = raw_value,
                        "matrix entity has out-of-enum axis value; routed to unclassified"
                    );
                    matrix.unclassified.push(UnclassifiedEntity {
                        entity,
                        axis,
                        raw_value: raw_value.to_owned(),
                    });
                }
            }
        }

        Ok(matrix)
    }
}

/// Heat colouring for a cell: weight product >= 6 is Red, >= 3 Yellow, else Green.
#[must_use]
pub fn exposure_status(a: OrdinalAxis, b: OrdinalAxis) -> StatusValue {
    match a.weight() * b.weight() {
        score if score >= 6 => StatusValue::Red,
        score if score >= 3 => StatusValue::Yellow,
        _ => StatusValue::Green,
    }
}

#[must_use]
pub fn engagement_strategy(influence: OrdinalAxis, interest: OrdinalAxis) -> &'static str {
    use OrdinalAxis::{High, Low, Medium};
    match (influence, interest) {
        (High, High) | (High, Medium) | (Medium, High) => "Manage closely",
        (High, Low) | (Medium, Medium) | (Medium, Low) => "Keep satisfied",
        (Low, High) | (Low, Medium) => "Keep informed",
        (Low, Low) => "Monitor",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        engagement_strategy, exposure_status, MatrixEntity, OrdinalAxis, PriorityMatrixBuilder,
        UnclassifiedPolicy,
    };
    use crate::error::MatrixError;
    use crate::status::StatusValue;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Stakeholder {
        id: &'static str,
        influence: &'static str,
        interest: &'static str,
    }

    impl MatrixEntity for Stakeholder {
        fn entity_id(&self) -> &str {
            self.id
        }
    }

    fn stakeholder(id: &'static str, influence: &'static str, interest: &'static str) -> Stakeholder {
        Stakeholder {
            id,
            influence,
            interest,
        }
    }

    fn ids(entities: &[&Stakeholder]) -> Vec<&'static str> {
        entities.iter().map(|entity| entity.id).collect()
    }

    #[test]
    fn axis_parse_accepts_only_the_three_levels() {
        assert_eq!(OrdinalAxis::parse(" HIGH "), Some(OrdinalAxis::High));
        assert_eq!(OrdinalAxis::parse("medium"), Some(OrdinalAxis::Medium));
        assert_eq!(OrdinalAxis::parse("Low"), Some(OrdinalAxis::Low));
        for raw in ["h", "med", "m", "l", "Very High", ""] {
            assert_eq!(OrdinalAxis::parse(raw), None, "raw={raw:?}");
        }
    }

    #[test]
    fn abbreviated_axis_values_are_unclassified() {
        let input = vec![stakeholder("A", "h", "High")];
        let matrix = match PriorityMatrixBuilder::stakeholders().build(
            &input,
            |s| s.influence,
            |s| s.interest,
        ) {
            Ok(matrix) => matrix,
            Err(err) => panic!("build failed: {err}"),
        };
        assert_eq!(matrix.unclassified().len(), 1);
        assert_eq!(matrix.unclassified()[0].raw_value, "h");
    }

    #[test]
    fn buckets_two_entities_into_their_cells() {
        let input = vec![
            stakeholder("A", "High", "High"),
            stakeholder("B", "Low", "Medium"),
        ];
        let matrix = match PriorityMatrixBuilder::stakeholders().build(
            &input,
            |s| s.influence,
            |s| s.interest,
        ) {
            Ok(matrix) => matrix,
            Err(err) => panic!("build failed: {err}"),
        };

        assert_eq!(ids(matrix.bucket(OrdinalAxis::High, OrdinalAxis::High)), vec!["A"]);
        assert_eq!(ids(matrix.bucket(OrdinalAxis::Low, OrdinalAxis::Medium)), vec!["B"]);
        let non_empty = matrix.cells().filter(|(_, _, cell)| !cell.is_empty()).count();
        assert_eq!(non_empty, 2);
        assert_eq!(matrix.len(), 2);
        assert!(matrix.unclassified().is_empty());
    }

    #[test]
    fn buckets_preserve_input_order() {
        let input = vec![
            stakeholder("c", "medium", "low"),
            stakeholder("a", "high", "high"),
            stakeholder("b", "medium", "low"),
            stakeholder("d", "medium", "low"),
        ];
        let matrix = match PriorityMatrixBuilder::stakeholders().build(
            &input,
            |s| s.influence,
            |s| s.interest,
        ) {
            Ok(matrix) => matrix,
            Err(err) => panic!("build failed: {err}"),
        };
        assert_eq!(
            ids(matrix.bucket(OrdinalAxis::Medium, OrdinalAxis::Low)),
            vec!["c", "b", "d"]
        );
        assert_eq!(matrix.counts()[1][2], 3);
        assert_eq!(matrix.counts()[0][0], 1);
    }

    #[test]
    fn out_of_enum_axis_lands_in_unclassified_bucket() {
        let input = vec![
            stakeholder("ok", "low", "low"),
            stakeholder("bad", "critical", "high"),
        ];
        let matrix = match PriorityMatrixBuilder::stakeholders()
            .policy(UnclassifiedPolicy::Bucket)
            .build(&input, |s| s.influence, |s| s.interest)
        {
            Ok(matrix) => matrix,
            Err(err) => panic!("bucket policy must not fail: {err}"),
        };
        assert_eq!(matrix.len(), 2);
        let unclassified = matrix.unclassified();
        assert_eq!(unclassified.len(), 1);
        assert_eq!(unclassified[0].entity.id, "bad");
        assert_eq!(unclassified[0].axis, "influence");
        assert_eq!(unclassified[0].raw_value, "critical");
    }

    #[test]
    fn reject_policy_fails_with_descriptive_error() {
        let input = vec![
            stakeholder("ok", "low", "low"),
            stakeholder("bad", "high", ""),
        ];
        let err = match PriorityMatrixBuilder::risks()
            .policy(UnclassifiedPolicy::Reject)
            .build(&input, |s| s.influence, |s| s.interest)
        {
            Ok(_) => panic!("expected rejection"),
            Err(err) => err,
        };
        assert_eq!(
            err,
            MatrixError::OutOfEnumAxis {
                entity_id: "bad".to_owned(),
                axis: "impact",
                value: String::new(),
            }
        );
        assert!(err.to_string().contains("impact"), "err={err}");
    }

    #[test]
    fn select_finds_classified_and_unclassified_entities() {
        let input = vec![
            stakeholder("A", "high", "low"),
            stakeholder("Z", "unknown", "low"),
        ];
        let matrix = match PriorityMatrixBuilder::stakeholders().build(
            &input,
            |s| s.influence,
            |s| s.interest,
        ) {
            Ok(matrix) => matrix,
            Err(err) => panic!("build failed: {err}"),
        };
        assert_eq!(matrix.select("A").map(|s| s.id), Some("A"));
        assert_eq!(matrix.select(" Z ").map(|s| s.id), Some("Z"));
        assert!(matrix.select("missing").is_none());
        assert!(matrix.select("").is_none());
    }

    #[test]
    fn exposure_and_engagement_classification() {
        assert_eq!(exposure_status(OrdinalAxis::High, OrdinalAxis::Medium), StatusValue::Red);
        assert_eq!(exposure_status(OrdinalAxis::High, OrdinalAxis::Low), StatusValue::Yellow);
        assert_eq!(exposure_status(OrdinalAxis::Low, OrdinalAxis::Medium), StatusValue::Green);
        assert_eq!(engagement_strategy(OrdinalAxis::High, OrdinalAxis::High), "Manage closely");
        assert_eq!(engagement_strategy(OrdinalAxis::Low, OrdinalAxis::Low), "Monitor");
    }
}
