use crate::error::NetworkError;
use crate::graph::PatternGraph;
use crate::model::Category;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

#[derive(Default)]
struct DiagnosticResults {
    passed: usize,
    warnings: usize,
}

impl DiagnosticResults {
    fn pass(&mut self, message: &str) {
        self.passed += 1;
        println!("  {} {}", "✓".green(), message);
    }

    fn warn(&mut self, message: &str) {
        self.warnings += 1;
        println!("  {} {}", "!".yellow(), message);
    }

    fn detail(&self, message: &str) {
        println!("      - {}", message);
    }
}

pub fn handle_check(ctx: &CommandContext, json: bool, strict: bool) -> Result<()> {
    let catalog = &ctx.catalog;
    let (graph, report) = PatternGraph::build_with_report(catalog);
    let one_sided = catalog.one_sided();
    let isolated: Vec<&str> = graph.isolated().map(|n| n.name.as_str()).collect();

    if json {
        let by_category: serde_json::Map<String, serde_json::Value> = Category::ALL
            .iter()
            .map(|&c| (c.label().to_string(), graph.nodes_in(c).count().into()))
            .collect();
        let summary = serde_json::json!({
            "nodes": graph.node_count(),
            "edges": graph.edge_count(),
            "by_category": by_category,
            "dangling": report.dropped,
            "one_sided": one_sided
                .iter()
                .map(|(source, target)| serde_json::json!({ "source": source, "target": target }))
                .collect::<Vec<_>>(),
            "isolated": isolated,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let mut results = DiagnosticResults::default();

        println!("{}", "pattern-network check".bold());
        println!("{}", "═".repeat(60));
        println!();

        println!("{}", "Patterns".bold());
        results.pass(&format!(
            "{} patterns, {} relationships",
            graph.node_count(),
            graph.edge_count()
        ));
        for category in Category::ALL {
            let count = graph.nodes_in(category).count();
            results.detail(&format!("{} ({}): {}", category, category.color_name(), count));
        }
        println!();

        println!("{}", "Relationships".bold());
        if report.is_clean() {
            results.pass("All relationships reference categorized patterns");
        } else {
            results.warn(&format!(
                "{} relationship(s) reference uncategorized patterns",
                report.dropped.len()
            ));
            for dropped in &report.dropped {
                results.detail(&format!(
                    "{} -> {} (missing: {})",
                    dropped.source,
                    dropped.target,
                    dropped.missing.join(", ")
                ));
            }
        }
        if one_sided.is_empty() {
            results.pass("All relationships are declared in both directions");
        } else {
            results.warn(&format!(
                "{} relationship(s) declared in one direction only",
                one_sided.len()
            ));
            for (source, target) in &one_sided {
                results.detail(&format!("{} -> {}", source, target));
            }
        }
        if isolated.is_empty() {
            results.pass("Every pattern has at least one relationship");
        } else {
            results.warn(&format!("{} isolated pattern(s)", isolated.len()));
            for name in &isolated {
                results.detail(name);
            }
        }

        println!();
        println!("{}", "═".repeat(60));
        println!(
            "{} passed, {} warnings",
            results.passed.to_string().green(),
            results.warnings.to_string().yellow()
        );
    }

    if (strict || ctx.config.network.strict) && !report.is_clean() {
        return Err(NetworkError::DanglingRelationships(report.dropped.len()).into());
    }
    Ok(())
}
