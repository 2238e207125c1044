use serde::{Deserialize, Serialize};

/// Estado de un paso dentro de una sesión, para la capa de presentación.
///
/// - `Passed`: su validador pasó al menos una vez en esta sesión (puede haber
///   sido editado después; el envío vuelve a validar todo).
/// - `Current`: paso visible.
/// - `Blocked`: paso visible con errores pendientes.
/// - `Pending`: aún no alcanzado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Current,
    Blocked,
    Passed,
}

/// Lo que la capa de presentación necesita para dibujar el indicador de
/// pasos y elegir el renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub render_token: String,
    pub status: StepStatus,
}
