pub mod service_directory_reqwest;

pub use service_directory_reqwest::ReqwestServiceDirectory;
