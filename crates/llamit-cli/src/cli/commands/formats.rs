//! `llamit formats` – list commit message formats.

use llamit_core::prompt::PromptFormat;

pub fn run_formats() {
    for format in PromptFormat::ALL {
        let note = match format {
            PromptFormat::Conventional => " (default)",
            PromptFormat::Custom => " (uses --custom-template)",
            _ => "",
        };
        println!("{}{}", format, note);
    }
}
