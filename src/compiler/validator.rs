//! Document validation before compilation.
//!
//! Checks every key symbol in the document against the key database and
//! dry-runs the chord compiler, so the `validate` and `build` commands
//! can present all findings at once instead of failing on the first.

use crate::compiler::chords::compile;
use crate::compiler::report::{CompileError, CompileErrorKind, CompileReport};
use crate::constants::HYPER_VARIABLE;
use crate::key_db::KeyDb;
use crate::models::{Action, KeySymbol, LayerDocument, Node, SubLayer};

/// Validates a layer document against the key database.
pub struct DocumentValidator<'a> {
    document: &'a LayerDocument,
    key_db: &'a KeyDb,
}

impl<'a> DocumentValidator<'a> {
    /// Creates a new validator.
    #[must_use]
    pub const fn new(document: &'a LayerDocument, key_db: &'a KeyDb) -> Self {
        Self { document, key_db }
    }

    /// Runs all checks and returns the aggregated report.
    #[must_use]
    pub fn validate(&self) -> CompileReport {
        let mut report = CompileReport::new();

        self.check_key_symbol(&mut report, &self.document.hyper.from, None);
        if let Some(alone) = &self.document.hyper.alone {
            self.check_action(&mut report, alone, None);
        }

        for binding in self.document.layers.bindings() {
            self.check_key_symbol(&mut report, &binding.key, None);
            match &binding.node {
                Node::Layer(sub) => self.check_sublayer(&mut report, &binding.key, sub),
                Node::Action(action) => self.check_action(&mut report, action, None),
            }
        }

        match compile(&self.document.layers, HYPER_VARIABLE) {
            Ok(output) => report.warnings.extend(output.warnings),
            Err(error) => report.add_error(error),
        }

        report
    }

    fn check_sublayer(&self, report: &mut CompileReport, group: &KeySymbol, sub: &SubLayer) {
        for binding in sub.bindings() {
            self.check_key_symbol(report, &binding.key, Some(group));
            match &binding.node {
                Node::Action(action) => self.check_action(report, action, Some(group)),
                // Depth violations are the compiler's finding; still walk
                // into the nested layer so its key symbols get checked.
                Node::Layer(nested) => self.check_sublayer(report, &binding.key, nested),
            }
        }
    }

    fn check_action(&self, report: &mut CompileReport, action: &Action, group: Option<&KeySymbol>) {
        if let Action::Key(output) = action {
            self.check_key_symbol(report, &output.key, group);
        }
    }

    fn check_key_symbol(
        &self,
        report: &mut CompileReport,
        key: &KeySymbol,
        group: Option<&KeySymbol>,
    ) {
        if self.key_db.is_valid(key.as_str()) {
            return;
        }

        let mut error = CompileError::new(
            CompileErrorKind::UnknownKeySymbol,
            format!("'{key}' is not a known Karabiner key code"),
        )
        .with_key(key.as_str())
        .with_suggestion(self.key_db.suggest(key.as_str()));

        if let Some(group) = group {
            error = error.with_group(group.as_str());
        }

        report.add_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LayerSet, Modifier};

    fn document_with(layers: LayerSet) -> LayerDocument {
        LayerDocument::new(layers)
    }

    fn key_db() -> KeyDb {
        KeyDb::load().unwrap()
    }

    #[test]
    fn test_valid_document_passes() {
        let mut layers = LayerSet::new();
        let mut sub = SubLayer::new();
        sub.bind(
            KeySymbol::new("semicolon"),
            Node::Action(Action::key(KeySymbol::new("h"), vec![Modifier::RightCommand])),
        )
        .unwrap();
        layers
            .bind(KeySymbol::new("w"), Node::Layer(sub))
            .unwrap();

        let document = document_with(layers);
        let db = key_db();
        let report = DocumentValidator::new(&document, &db).validate();
        assert!(report.is_valid(), "{}", report.format_message());
    }

    #[test]
    fn test_unknown_group_key_reported() {
        let mut layers = LayerSet::new();
        layers
            .bind(KeySymbol::new("oo"), Node::Layer(SubLayer::new()))
            .unwrap();

        let document = document_with(layers);
        let db = key_db();
        let report = DocumentValidator::new(&document, &db).validate();
        assert!(!report.is_valid());
        assert!(report
            .errors
            .iter()
            .any(|e| e.kind == CompileErrorKind::UnknownKeySymbol));
    }

    #[test]
    fn test_unknown_key_output_reported_with_group() {
        let mut layers = LayerSet::new();
        let mut sub = SubLayer::new();
        sub.bind(
            KeySymbol::new("h"),
            Node::Action(Action::key(KeySymbol::new("leftarrow"), Vec::new())),
        )
        .unwrap();
        layers
            .bind(KeySymbol::new("v"), Node::Layer(sub))
            .unwrap();

        let document = document_with(layers);
        let db = key_db();
        let report = DocumentValidator::new(&document, &db).validate();

        let error = report
            .errors
            .iter()
            .find(|e| e.kind == CompileErrorKind::UnknownKeySymbol)
            .unwrap();
        assert_eq!(error.group.as_deref(), Some("v"));
        assert!(error.suggestion.as_deref().unwrap().contains("left_arrow"));
    }

    #[test]
    fn test_empty_sublayer_surfaces_warning() {
        let mut layers = LayerSet::new();
        layers
            .bind(KeySymbol::new("l"), Node::Layer(SubLayer::new()))
            .unwrap();

        let document = document_with(layers);
        let db = key_db();
        let report = DocumentValidator::new(&document, &db).validate();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }
}
