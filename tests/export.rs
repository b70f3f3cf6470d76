#[cfg(test)]
mod tests {
    use chronolog::libs::export::{render_html, render_markdown, ExportFormat, Exporter, ReportTable};
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        tables: Vec<ReportTable>,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let mut by_project = ReportTable::new("By Project", &["Project", "Tasks", "Duration"]);
            by_project.push_row(vec!["website".to_string(), "deploy, fix".to_string(), "1h 0m 0s".to_string()]);
            by_project.push_row(vec!["api".to_string(), "review".to_string(), "15m 0s".to_string()]);

            let mut by_day = ReportTable::new("By Day", &["Day", "Project", "Duration"]);
            by_day.push_row(vec!["2025-01-15".to_string(), "website".to_string(), "1h 0m 0s".to_string()]);

            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                tables: vec![by_project, by_day],
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("report.csv");
        Exporter::new(ExportFormat::Csv, Some(path.clone())).export(&ctx.tables).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "By Project");
        assert_eq!(lines[1], "Project,Tasks,Duration");
        assert_eq!(lines[2], "website,\"deploy, fix\",1h 0m 0s");
        assert!(lines.contains(&"By Day"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("report.json");
        Exporter::new(ExportFormat::Json, Some(path.clone())).export(&ctx.tables).unwrap();

        let loaded: Vec<ReportTable> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, ctx.tables);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_markdown_and_html(ctx: &mut ExportTestContext) {
        let md = ctx.temp_dir.path().join("report.md");
        let html = ctx.temp_dir.path().join("report.html");
        Exporter::new(ExportFormat::Md, Some(md.clone())).export(&ctx.tables).unwrap();
        Exporter::new(ExportFormat::Html, Some(html.clone())).export(&ctx.tables).unwrap();

        assert!(fs::read_to_string(&md).unwrap().contains("## By Day"));
        assert!(fs::read_to_string(&html).unwrap().contains("<h2>By Project</h2>"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_excel(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("report.xlsx");
        Exporter::new(ExportFormat::Excel, Some(path.clone())).export(&ctx.tables).unwrap();

        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_default_output_name() {
        let exporter = Exporter::new(ExportFormat::Md, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("chronolog_report_"));
        assert!(name.ends_with(".md"));
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let mut table = ReportTable::new("Notes", &["Note"]);
        table.push_row(vec!["a | b".to_string()]);

        let md = render_markdown(&[table]);
        assert!(md.contains("| Note |\n|---|\n"));
        assert!(md.contains("| a \\| b |"));
    }

    #[test]
    fn test_html_escapes_cells() {
        let mut table = ReportTable::new("R&D", &["Note"]);
        table.push_row(vec!["<script>\"x\"</script>".to_string()]);

        let html = render_html(&[table]).unwrap();
        assert!(html.contains("<h2>R&amp;D</h2>"));
        assert!(html.contains("&lt;script&gt;&quot;x&quot;&lt;/script&gt;</td>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_html_table_per_section() {
        let mut first = ReportTable::new("By Project", &["Project", "Duration"]);
        first.push_row(vec!["website".to_string(), "1h 0m 0s".to_string()]);
        let second = ReportTable::new("By Day", &["Day"]);

        let html = render_html(&[first, second]).unwrap();
        assert_eq!(html.matches("<table>").count(), 2);
        assert!(html.contains(">website</td>"));
        assert!(html.contains(">Duration</td>"));
        assert!(html.ends_with("</body>\n</html>\n"));
    }
}
