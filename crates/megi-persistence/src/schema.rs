//! Esquema Diesel de `wizard_drafts`. Reemplazable con `diesel print-schema`.

diesel::table! {
    wizard_drafts (draft_key) {
        draft_key -> Text,
        flow -> Text,
        definition_hash -> Text,
        payload -> Jsonb,
        schema_version -> Integer,
        updated_at -> Timestamptz,
    }
}
