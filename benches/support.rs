//! Shared helpers for benchmarks

/// CSV text with a header row and `rows` data rows
#[allow(dead_code)]
pub fn csv_text(rows: usize) -> String {
    let mut text = String::from("id,name,city,score\n");
    for i in 0..rows {
        text.push_str(&format!(
            "{},\"Person {}\",City {},{}\n",
            i,
            i,
            i % 97,
            (i * 7919) % 1000
        ));
    }
    text
}

/// JSON-lines text with every tenth line malformed
#[allow(dead_code)]
pub fn jsonl_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        if i % 10 == 9 {
            text.push_str(&format!("{{\"id\":{},\"broken\"\n", i));
        } else {
            text.push_str(&format!("{{\"id\":{},\"tags\":[\"a\",\"b\"],\"ok\":true}}\n", i));
        }
    }
    text
}
