//! Response formatting
//!
//! Pure functions mapping typed SafeNest results to markdown text blocks.
//! Severity/risk/trend labels are decorated from static glyph tables with a
//! neutral fallback; fractional scores render as whole-number percentages.
//! Conditional sections collapse to an empty line when absent.

use chrono::{DateTime, Utc};
use safenest_client::types::*;

/// Glyph for a severity label
pub fn severity_glyph(severity: &str) -> &'static str {
    match severity {
        "low" => "🟡",
        "medium" => "🟠",
        "high" => "🔴",
        "critical" => "⛔",
        _ => "⚪",
    }
}

/// Glyph for a risk-level label
pub fn risk_glyph(risk: &str) -> &'static str {
    match risk {
        "safe" | "none" => "✅",
        other => severity_glyph(other),
    }
}

/// Glyph for an emotional trend label
pub fn trend_glyph(trend: &str) -> &'static str {
    match trend {
        "improving" => "📈",
        "worsening" => "📉",
        _ => "➡️",
    }
}

/// Render a fraction in [0, 1] as a whole-number percentage
pub fn percent(value: f64) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}

/// Uppercase the first character for display
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn numbered_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn glyph_list(items: &[String], glyph: &str) -> String {
    items
        .iter()
        .map(|item| format!("- {} {}", glyph, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a bullying detection verdict
pub fn bullying(v: &BullyingVerdict) -> String {
    let header = if v.is_bullying {
        "⚠️ Bullying Detected"
    } else {
        "✅ No Bullying Detected"
    };

    let types = if v.is_bullying {
        format!("**Types:** {}", v.bullying_type.join(", "))
    } else {
        String::new()
    };

    format!(
        "## {header}\n\n\
         **Severity:** {} {}\n\
         **Confidence:** {}\n\
         **Risk Score:** {}\n\n\
         {types}\n\n\
         ### Rationale\n{}\n\n\
         ### Recommended Action\n`{}`",
        severity_glyph(&v.severity),
        capitalize(&v.severity),
        percent(v.confidence),
        percent(v.risk_score),
        v.rationale,
        v.recommended_action,
    )
}

/// Format a grooming detection verdict
pub fn grooming(v: &GroomingVerdict) -> String {
    let header = if v.grooming_risk == "none" {
        "✅ No Grooming Detected"
    } else {
        "⚠️ Grooming Risk Detected"
    };

    let flags = if v.flags.is_empty() {
        String::new()
    } else {
        format!("**Warning Flags:**\n{}", glyph_list(&v.flags, "🚩"))
    };

    format!(
        "## {header}\n\n\
         **Risk Level:** {} {}\n\
         **Confidence:** {}\n\
         **Risk Score:** {}\n\n\
         {flags}\n\n\
         ### Rationale\n{}\n\n\
         ### Recommended Action\n`{}`",
        risk_glyph(&v.grooming_risk),
        capitalize(&v.grooming_risk),
        percent(v.confidence),
        percent(v.risk_score),
        v.rationale,
        v.recommended_action,
    )
}

/// Format an unsafe-content verdict
pub fn unsafe_content(v: &UnsafeVerdict) -> String {
    let header = if v.is_unsafe {
        "⚠️ Unsafe Content Detected"
    } else {
        "✅ Content is Safe"
    };

    let categories = if v.is_unsafe {
        format!("**Categories:**\n{}", glyph_list(&v.categories, "⚠️"))
    } else {
        String::new()
    };

    format!(
        "## {header}\n\n\
         **Severity:** {} {}\n\
         **Confidence:** {}\n\
         **Risk Score:** {}\n\n\
         {categories}\n\n\
         ### Rationale\n{}\n\n\
         ### Recommended Action\n`{}`",
        severity_glyph(&v.severity),
        capitalize(&v.severity),
        percent(v.confidence),
        percent(v.risk_score),
        v.rationale,
        v.recommended_action,
    )
}

/// Format a combined safety analysis
pub fn analysis(a: &SafetyAnalysis) -> String {
    let bullying_check = match &a.bullying {
        Some(b) if b.is_bullying => "\n**Bullying Check:** ⚠️ Detected\n".to_string(),
        Some(_) => "\n**Bullying Check:** ✅ Clear\n".to_string(),
        None => String::new(),
    };

    let unsafe_check = match &a.unsafe_content {
        Some(u) if u.is_unsafe => "\n**Unsafe Content:** ⚠️ Detected\n".to_string(),
        Some(_) => "\n**Unsafe Content:** ✅ Clear\n".to_string(),
        None => String::new(),
    };

    format!(
        "## Safety Analysis Results\n\n\
         **Overall Risk:** {} {}\n\
         **Risk Score:** {}\n\n\
         ### Summary\n{}\n\n\
         ### Recommended Action\n`{}`\n\n\
         ---\n{bullying_check}{unsafe_check}",
        risk_glyph(&a.risk_level),
        capitalize(&a.risk_level),
        percent(a.risk_score),
        a.summary,
        a.recommended_action,
    )
}

/// Format an emotion analysis report
pub fn emotions(r: &EmotionReport) -> String {
    // Descending by score; name order breaks ties deterministically.
    let mut scores: Vec<(&String, &f64)> = r.emotion_scores.iter().collect();
    scores.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let score_list = scores
        .iter()
        .map(|(emotion, score)| format!("- {}: {}", emotion, percent(**score)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## Emotion Analysis\n\n\
         **Dominant Emotions:** {}\n\
         **Trend:** {} {}\n\n\
         ### Emotion Scores\n{score_list}\n\n\
         ### Summary\n{}\n\n\
         ### Recommended Follow-up\n{}",
        r.dominant_emotions.join(", "),
        trend_glyph(&r.trend),
        capitalize(&r.trend),
        r.summary,
        r.recommended_followup,
    )
}

/// Format an action plan
pub fn action_plan(p: &ActionPlan) -> String {
    let reading_level = p
        .reading_level
        .as_ref()
        .map(|level| format!("**Reading Level:** {}", level))
        .unwrap_or_default();

    format!(
        "## Action Plan\n\n\
         **Audience:** {}\n\
         **Tone:** {}\n\
         {reading_level}\n\n\
         ### Steps\n{}",
        p.audience,
        p.tone,
        numbered_list(&p.steps),
    )
}

/// Format an incident report
pub fn report(r: &IncidentReport) -> String {
    format!(
        "## 📋 Incident Report\n\n\
         **Risk Level:** {} {}\n\n\
         ### Summary\n{}\n\n\
         ### Categories\n{}\n\n\
         ### Recommended Next Steps\n{}",
        risk_glyph(&r.risk_level),
        capitalize(&r.risk_level),
        r.summary,
        r.categories
            .iter()
            .map(|c| format!("- {}", c))
            .collect::<Vec<_>>()
            .join("\n"),
        numbered_list(&r.recommended_next_steps),
    )
}

// ============== Governance formatting ==============

/// Format an erasure receipt
pub fn erasure(r: &ErasureReceipt) -> String {
    let categories = if r.deleted_categories.is_empty() {
        String::new()
    } else {
        format!(
            "**Deleted Categories:**\n{}",
            r.deleted_categories
                .iter()
                .map(|c| format!("- {}", c))
                .collect::<Vec<_>>()
                .join("\n")
        )
    };

    let completed = r
        .completed_at
        .as_ref()
        .map(|ts| format!("**Completed:** {}", timestamp(ts)))
        .unwrap_or_default();

    format!(
        "## 🗑️ Erasure Request Accepted\n\n\
         **Request ID:** {}\n\
         **Status:** {}\n\n\
         {categories}\n\n\
         {completed}",
        r.request_id,
        capitalize(&r.status),
    )
}

/// Format a data-export receipt
pub fn export(r: &ExportReceipt) -> String {
    format!(
        "## 📦 Data Export Ready\n\n\
         **Request ID:** {}\n\
         **Format:** {}\n\
         **Download URL:** {}\n\
         **Expires:** {}",
        r.request_id,
        r.format,
        r.download_url,
        timestamp(&r.expires_at),
    )
}

/// Format a consent record (used for both grant and withdrawal)
pub fn consent_update(r: &ConsentRecord) -> String {
    let (header, status) = if r.granted {
        ("✅ Consent Recorded", "Granted")
    } else {
        ("🚫 Consent Withdrawn", "Withdrawn")
    };

    format!(
        "## {header}\n\n\
         **User:** {}\n\
         **Type:** {}\n\
         **Status:** {status}\n\
         **Recorded:** {}",
        r.user_id,
        r.consent_type,
        timestamp(&r.recorded_at),
    )
}

/// Format a user's consent status
pub fn consent_status(s: &ConsentStatus) -> String {
    let consents = if s.consents.is_empty() {
        "No consent records on file.".to_string()
    } else {
        s.consents
            .iter()
            .map(|c| {
                let (glyph, verb) = if c.granted {
                    ("✅", "granted")
                } else {
                    ("🚫", "withdrawn")
                };
                format!(
                    "- {} {} ({} {})",
                    glyph,
                    c.consent_type,
                    verb,
                    timestamp(&c.recorded_at)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "## 📋 Consent Status\n\n\
         **User:** {}\n\n\
         {consents}",
        s.user_id,
    )
}

/// Format a rectification receipt
pub fn rectification(r: &RectificationReceipt) -> String {
    let fields = if r.updated_fields.is_empty() {
        String::new()
    } else {
        format!(
            "**Updated Fields:**\n{}",
            r.updated_fields
                .iter()
                .map(|f| format!("- {}", f))
                .collect::<Vec<_>>()
                .join("\n")
        )
    };

    format!(
        "## ✏️ Data Rectified\n\n\
         **Request ID:** {}\n\
         **Status:** {}\n\n\
         {fields}",
        r.request_id,
        capitalize(&r.status),
    )
}

/// Format an audit-log page
pub fn audit_logs(page: &AuditLogPage) -> String {
    let entries = if page.entries.is_empty() {
        "No audit entries found.".to_string()
    } else {
        page.entries
            .iter()
            .map(|e| {
                format!(
                    "- [{}] {} {} {}",
                    timestamp(&e.timestamp),
                    e.actor,
                    e.action,
                    e.resource
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("## 📜 Audit Log\n\n{entries}")
}

/// Format a single breach record
pub fn breach(b: &BreachRecord) -> String {
    let occurred = b
        .occurred_at
        .as_ref()
        .map(|ts| format!("**Occurred:** {}", timestamp(ts)))
        .unwrap_or_default();

    let categories = if b.data_categories.is_empty() {
        String::new()
    } else {
        format!(
            "**Data Categories:**\n{}",
            b.data_categories
                .iter()
                .map(|c| format!("- {}", c))
                .collect::<Vec<_>>()
                .join("\n")
        )
    };

    format!(
        "## 🚨 Data Breach Record\n\n\
         **ID:** {}\n\
         **Severity:** {} {}\n\
         **Status:** {}\n\
         **Affected Users:** {}\n\
         **Reported:** {}\n\
         {occurred}\n\n\
         ### Description\n{}\n\n\
         {categories}",
        b.id,
        severity_glyph(&b.severity),
        capitalize(&b.severity),
        capitalize(&b.status),
        b.affected_users,
        timestamp(&b.reported_at),
        b.description,
    )
}

/// Format a breach listing
pub fn breach_list(list: &BreachList) -> String {
    let breaches = if list.breaches.is_empty() {
        "No breaches recorded.".to_string()
    } else {
        list.breaches
            .iter()
            .map(|b| {
                format!(
                    "- {} [{}] {} ({})",
                    severity_glyph(&b.severity),
                    b.id,
                    b.description,
                    b.status
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "## 🚨 Breach Records\n\n\
         **Total:** {}\n\n\
         {breaches}",
        list.breaches.len(),
    )
}
