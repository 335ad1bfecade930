//! Student record schema and the branch derivation.

/// A named assessment component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Quiz,
    MidSem,
    LabTest,
    WeeklyLabs,
    PreCompre,
    Compre,
    Total,
}

/// Declared component order. Drives every averages/rankings iteration and
/// all user-facing rendering, so console and JSON output stay deterministic.
pub const COMPONENTS: [Component; 7] = [
    Component::Quiz,
    Component::MidSem,
    Component::LabTest,
    Component::WeeklyLabs,
    Component::PreCompre,
    Component::Compre,
    Component::Total,
];

impl Component {
    /// Column header and report key for this component.
    pub fn name(self) -> &'static str {
        match self {
            Component::Quiz => "Quiz",
            Component::MidSem => "MidSem",
            Component::LabTest => "LabTest",
            Component::WeeklyLabs => "WeeklyLabs",
            Component::PreCompre => "PreCompre",
            Component::Compre => "Compre",
            Component::Total => "Total",
        }
    }
}

/// One row of the gradebook. Constructed once per input row; the derived
/// `branch` is filled at construction and the record is immutable afterward,
/// apart from the optional total-recompute pass before aggregation.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub campus_id: String,
    pub class_no: String,
    /// Derived from `campus_id`; empty means unclassified.
    pub branch: String,
    pub quiz: i64,
    pub mid_sem: i64,
    pub lab_test: i64,
    pub weekly_labs: i64,
    pub pre_compre: i64,
    pub compre: i64,
    pub total: i64,
}

impl StudentRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        campus_id: impl Into<String>,
        class_no: impl Into<String>,
        quiz: i64,
        mid_sem: i64,
        lab_test: i64,
        weekly_labs: i64,
        pre_compre: i64,
        compre: i64,
        total: i64,
    ) -> Self {
        let campus_id = campus_id.into();
        let branch = derive_branch(&campus_id);
        StudentRecord {
            campus_id,
            class_no: class_no.into(),
            branch,
            quiz,
            mid_sem,
            lab_test,
            weekly_labs,
            pre_compre,
            compre,
            total,
        }
    }

    /// Score of a single component.
    pub fn score(&self, component: Component) -> i64 {
        match component {
            Component::Quiz => self.quiz,
            Component::MidSem => self.mid_sem,
            Component::LabTest => self.lab_test,
            Component::WeeklyLabs => self.weekly_labs,
            Component::PreCompre => self.pre_compre,
            Component::Compre => self.compre,
            Component::Total => self.total,
        }
    }
}

/// Extracts the two-character branch code at offset 4 of a campus id
/// (e.g. `"2021A7PS0001G"` -> `"A7"`). Ids shorter than 6 characters, or
/// ids where the window does not fall on character boundaries, yield the
/// empty string, which downstream treats as "unclassified".
pub fn derive_branch(campus_id: &str) -> String {
    campus_id.get(4..6).unwrap_or("").to_string()
}
