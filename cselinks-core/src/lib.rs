pub mod annotations;
pub mod domains;
pub mod error;
pub mod extract;
pub mod outline;
pub mod promotions;
pub mod report;
pub mod xml;

pub use error::{CoreError, Result};
pub use extract::{ExtractOptions, ExtractOutput, execute_extract, extract_documents};

pub fn print_banner() {
    println!(
        r#"
   ___ ___ ___ _    _      _
  / __/ __| __| |  (_)_ _ | |__ ___
 | (__\__ \ _|| |__| | ' \| / /(_-<
  \___|___/___|____|_|_||_|_\_\/__/
  course links -> custom search  v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
