#![warn(unused_extern_crates)]

use volumebind::volumebind;

#[tokio::main]
async fn main() {
    match volumebind().await {
        Ok(true) => (),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
