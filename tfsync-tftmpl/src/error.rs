use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to write {file} in root module for task '{task}'")]
    File {
        task: String,
        file: &'static str,
        #[source]
        source: tfsync_core::Error,
    },
}
