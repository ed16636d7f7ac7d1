pub mod gcp_stt;
pub mod structs;
