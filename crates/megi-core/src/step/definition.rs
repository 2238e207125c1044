use crate::model::FormData;

use super::ValidationResult;

/// Trait que define un paso del wizard. `validate` debe ser puro respecto a
/// `data`: sin efectos secundarios y determinista.
pub trait WizardStep: Send + Sync {
    /// Identificador estable y único dentro del wizard.
    fn id(&self) -> &str;

    /// Título visible (por defecto el id).
    fn title(&self) -> &str {
        self.id()
    }

    /// Token opaco con el que la capa de presentación elige el renderer.
    fn render_token(&self) -> &str {
        self.id()
    }

    /// Validación del paso. Un paso sin validador siempre es válido.
    fn validate(&self, _data: &FormData) -> ValidationResult {
        ValidationResult::valid()
    }
}
