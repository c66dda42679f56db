use wrlint::scanner::scan_line;
use wrlint::validate;

fn main() {
    println!("=== Template Line Scanner Demo ===");

    let test_lines = [
        r#"<wr-if condition="member.active">"#,
        "  <wr-then>%member.name%</wr-then>",
        "</wr-if>",
        "<!-- hidden from the scanner: <wr-junk> -->",
        "Save 50% today",
        "<wr-bogus>",
    ];

    for line in test_lines {
        println!("\nInput: '{}'", line);
        let scanned = scan_line(line);
        println!("Scanned: {:?}", scanned);
    }

    println!("\nFindings for the lines as one template:");
    for finding in validate(&test_lines.join("\n")) {
        println!("  {}", finding);
    }
}
