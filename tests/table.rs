use schema_align::table::render_table;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn render_table_pads_text_and_right_aligns_positions() {
    let headers = strings(&["#", "column", "type"]);
    let rows = vec![
        strings(&["1", "name", "text"]),
        strings(&["10", "thumbnail_url", "text"]),
    ];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            " #  column         type",
            "--  -------------  ----",
            " 1  name           text",
            "10  thumbnail_url  text",
        ]
    );
}

#[test]
fn render_table_flattens_control_characters() {
    let headers = strings(&["name"]);
    let rows = vec![strings(&["Prod\nComments\tField"])];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "Prod Comments Field");
}

#[test]
fn render_table_fills_short_rows_and_trims_trailing_space() {
    let headers = strings(&["column", "default"]);
    let rows = vec![
        strings(&["milestone", "false"]),
        strings(&["notes"]),
    ];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[2], "milestone  false");
    assert_eq!(lines[3], "notes");
}
