use serde::{Deserialize, Serialize};

/// Fixed full-marks denominator: 3 quizzes x 10 + assignments 20 +
/// attendance 10 + mid-semester 30 + final-semester 40.
pub const MAX_MARKS: u32 = 130;

/// One student's marked components for a course in a term. Upper caps
/// (10 per quiz, 20 assignments, 10 attendance, 30 mid, 40 final) are the
/// entry form's concern; the engine does not clamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    #[serde(default)]
    pub quizzes: Vec<u32>,
    #[serde(default, alias = "assignments_marks")]
    pub assignments: u32,
    #[serde(default, alias = "attendance_marks")]
    pub attendance: u32,
    #[serde(default, alias = "mid_sem_marks")]
    pub mid_semester: u32,
    #[serde(default, alias = "final_sem_marks")]
    pub final_semester: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl LetterGrade {
    pub fn symbol(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    /// Display color for this letter. Exhaustive on purpose: adding a
    /// letter without a color is a compile error, not an unstyled badge.
    pub fn color(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "#2E7D32",
            LetterGrade::A => "#4CAF50",
            LetterGrade::AMinus => "#8BC34A",
            LetterGrade::BPlus => "#CDDC39",
            LetterGrade::B => "#FFEB3B",
            LetterGrade::BMinus => "#FFC107",
            LetterGrade::CPlus => "#FF9800",
            LetterGrade::C => "#FF7043",
            LetterGrade::CMinus => "#FF5722",
            LetterGrade::DPlus => "#F4511E",
            LetterGrade::D => "#E64A19",
            LetterGrade::F => "#D32F2F",
        }
    }

    /// Same color at reduced opacity, for card backgrounds.
    pub fn background(&self) -> String {
        format!("{}33", self.color())
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub best_three_quiz_total: u32,
    pub total_marks: u32,
    pub percentage: f64,
    pub letter: LetterGrade,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleBand {
    pub letter: LetterGrade,
    pub min_percent: f64,
    pub color: &'static str,
}

const BANDS: [(f64, LetterGrade); 12] = [
    (90.0, LetterGrade::APlus),
    (85.0, LetterGrade::A),
    (80.0, LetterGrade::AMinus),
    (75.0, LetterGrade::BPlus),
    (70.0, LetterGrade::B),
    (65.0, LetterGrade::BMinus),
    (60.0, LetterGrade::CPlus),
    (55.0, LetterGrade::C),
    (50.0, LetterGrade::CMinus),
    (45.0, LetterGrade::DPlus),
    (40.0, LetterGrade::D),
    (0.0, LetterGrade::F),
];

/// Sum of the three highest quiz marks, or of all of them when fewer than
/// three exist. Supplementary display statistic only; the raw total in
/// `total_marks` always counts every quiz.
pub fn best_three_quiz_total(quizzes: &[u32]) -> u32 {
    let mut sorted = quizzes.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.iter().take(3).sum()
}

pub fn total_marks(record: &GradeRecord) -> u32 {
    record.quizzes.iter().sum::<u32>()
        + record.assignments
        + record.attendance
        + record.mid_semester
        + record.final_semester
}

pub fn percentage(total: u32) -> f64 {
    total as f64 / MAX_MARKS as f64 * 100.0
}

/// First-match-wins band lookup, highest threshold first. The comparison
/// uses the raw float; nothing is rounded before banding. Total over all
/// of f64, so even out-of-range inputs land on a letter.
pub fn letter_for_percentage(percent: f64) -> LetterGrade {
    for (min, letter) in BANDS.iter().take(BANDS.len() - 1) {
        if percent >= *min {
            return *letter;
        }
    }
    LetterGrade::F
}

pub fn grading_scale() -> Vec<ScaleBand> {
    BANDS
        .iter()
        .map(|(min, letter)| ScaleBand {
            letter: *letter,
            min_percent: *min,
            color: letter.color(),
        })
        .collect()
}

pub fn compute(record: &GradeRecord) -> GradeResult {
    let total = total_marks(record);
    let percent = percentage(total);
    GradeResult {
        best_three_quiz_total: best_three_quiz_total(&record.quizzes),
        total_marks: total,
        percentage: percent,
        letter: letter_for_percentage(percent),
    }
}
