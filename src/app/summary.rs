use crate::engine::RunReport;
use crate::metrics::format_duration;

/// Report lines in print order, starting with the blank separator line.
/// Latency lines appear only when at least one probe succeeded.
pub(crate) fn report_lines(report: &RunReport) -> Vec<String> {
    let stats = &report.stats;
    let mut lines = vec![
        String::new(),
        format!("Dns Server: {}", report.server.ip()),
        format!("Network: {}", report.network.label()),
        format!("Total Message Num: {}", stats.total_issued),
    ];

    if let (Some(average), Some(min), Some(max)) =
        (stats.average_latency(), stats.min_latency, stats.max_latency)
    {
        lines.push(format!("Average Delay: {}", format_duration(average)));
        lines.push(format!("Minimum Delay: {}", format_duration(min)));
        lines.push(format!("Maximum Delay: {}", format_duration(max)));
    }

    lines.push(format!("Err Message Num: {}", stats.total_errors));
    lines.push(format!("Err Message Percent: {}%", stats.error_percent_text()));
    lines
}

pub(crate) fn print_report(report: &RunReport) {
    for line in report_lines(report) {
        println!("{}", line);
    }
}
