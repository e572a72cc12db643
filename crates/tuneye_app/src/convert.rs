//! Mapping between the core stage machine's types and the engine's wire
//! types; the two crates stay independent of each other.

use tuneye_core::{CapturedContent, ContentKind, DetectionResult, Settings, Verdict, WeightedWord};
use tuneye_engine::{DetectionInput, DetectionReport, InputKind, SettingsSnapshot};

pub(crate) fn detection_input(content: &CapturedContent, settings: &Settings) -> DetectionInput {
    DetectionInput {
        kind: match content.kind {
            ContentKind::Text => InputKind::Text,
            ContentKind::Image => InputKind::Image,
        },
        value: content.value.clone(),
        settings: settings_snapshot(settings),
    }
}

pub(crate) fn settings_snapshot(settings: &Settings) -> SettingsSnapshot {
    SettingsSnapshot {
        enable_extension: settings.enable_extension,
        enable_record: settings.enable_record,
        enable_instruction_on_startup: settings.enable_instruction_on_startup,
        enable_test_mode: settings.enable_test_mode,
    }
}

pub(crate) fn report_to_result(report: DetectionReport) -> DetectionResult {
    DetectionResult {
        verdict: match report.verdict {
            tuneye_engine::Verdict::Fake => Verdict::Fake,
            tuneye_engine::Verdict::Real => Verdict::Real,
        },
        words: report
            .words
            .into_iter()
            .map(|word| WeightedWord {
                word: word.word,
                weight: word.weight,
            })
            .collect(),
    }
}

pub(crate) fn result_to_report(result: &DetectionResult) -> DetectionReport {
    DetectionReport {
        verdict: match result.verdict {
            Verdict::Fake => tuneye_engine::Verdict::Fake,
            Verdict::Real => tuneye_engine::Verdict::Real,
        },
        words: result
            .words
            .iter()
            .map(|word| tuneye_engine::WeightedWord {
                word: word.word.clone(),
                weight: word.weight,
            })
            .collect(),
    }
}
