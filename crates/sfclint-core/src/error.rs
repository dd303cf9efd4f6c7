pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed template YAML: {message}")]
    TemplateYaml { message: String },

    #[error("Malformed node templates: {message}")]
    NodeTemplates { message: String },

    #[error("Forwarding path {path} references unknown connection point {name}")]
    UnknownConnectionPoint { path: String, name: String },
}
