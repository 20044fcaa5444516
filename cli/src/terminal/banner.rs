use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
 ██╗      █████╗ ██╗   ██╗██████╗
 ██║     ██╔══██╗╚██╗ ██╔╝██╔══██╗
 ██║     ███████║ ╚████╔╝ ██████╔╝
 ██║     ██╔══██║  ╚██╔╝  ██╔══██╗
 ███████╗██║  ██║   ██║   ██║  ██║
 ╚══════╝╚═╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝
"#;

pub fn print() {
    for banner_line in BANNER.lines().skip(1) {
        print::print(&format!("{}", banner_line.bright_green()));
    }
    print::print(&format!(
        "{}",
        " layer stretching and timelapse for squished printers"
            .italic()
            .bright_black()
    ));
}
