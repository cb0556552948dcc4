use crate::config::ScoringConfig;
use crate::finding::Finding;
use crate::logging::append_run_log;
use crate::principle::Principle;
use serde_json::json;
use std::collections::BTreeMap;

pub const INITIAL_SCORE: i64 = 100;

// All five principles are always present. Scores only ever decrease; without a
// configured floor they may go negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    scores: BTreeMap<Principle, i64>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            scores: Principle::ALL
                .iter()
                .map(|principle| (*principle, INITIAL_SCORE))
                .collect(),
        }
    }

    pub fn get(&self, principle: Principle) -> i64 {
        self.scores
            .get(&principle)
            .copied()
            .unwrap_or(INITIAL_SCORE)
    }

    pub fn entries(&self) -> impl Iterator<Item = (Principle, i64)> + '_ {
        self.scores.iter().map(|(principle, score)| (*principle, *score))
    }

    pub fn overall(&self) -> i64 {
        let sum: i64 = self.scores.values().sum();
        (sum as f64 / Principle::ALL.len() as f64).round() as i64
    }

    fn deduct(&mut self, principle: Principle, amount: i64, floor: Option<i64>) {
        if let Some(score) = self.scores.get_mut(&principle) {
            *score -= amount;
            if let Some(floor) = floor {
                if *score < floor {
                    *score = floor;
                }
            }
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub board: ScoreBoard,
    pub overall: i64,
    pub finding_count: usize,
}

pub struct ScoreAggregator<'a> {
    cfg: &'a ScoringConfig,
    board: ScoreBoard,
    finding_count: usize,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(cfg: &'a ScoringConfig) -> Self {
        Self {
            cfg,
            board: ScoreBoard::new(),
            finding_count: 0,
        }
    }

    // Targeted deduction per implicated principle, plus a flat penalty on every
    // principle when the finding's severity is in the configured high set.
    pub fn apply(&mut self, finding: &Finding, principles: &[Principle]) {
        self.finding_count += 1;

        for principle in principles {
            self.board
                .deduct(*principle, self.cfg.principle_deduction, self.cfg.score_floor);
        }

        if self.cfg.is_high_severity(&finding.severity) {
            for principle in Principle::ALL {
                self.board
                    .deduct(principle, self.cfg.severity_penalty, self.cfg.score_floor);
            }
            append_run_log(
                "debug",
                "scoring.severity_penalty_applied",
                json!({
                    "rule_id": finding.rule_id,
                    "severity": finding.severity,
                    "penalty": self.cfg.severity_penalty
                }),
            );
        }
    }

    pub fn finish(self) -> ScoreSummary {
        let overall = self.board.overall();
        append_run_log(
            "info",
            "scoring.completed",
            json!({
                "finding_count": self.finding_count,
                "overall": overall,
                "scores": self
                    .board
                    .entries()
                    .map(|(principle, score)| (principle.as_str().to_string(), score))
                    .collect::<BTreeMap<String, i64>>()
            }),
        );
        ScoreSummary {
            board: self.board,
            overall,
            finding_count: self.finding_count,
        }
    }
}
