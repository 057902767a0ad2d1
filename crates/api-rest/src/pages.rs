//! Static and templated HTML pages served by the REST API.

/// The visit entry form served at `/`.
///
/// The form field `age` is stored verbatim as the record's `age_group`;
/// the option values here are conventions, not an enforced vocabulary.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>VisitLog - Add Patient Visit</title>
</head>
<body>
  <h1>Add Patient Visit</h1>
  <form action="/add_patient" method="post">
    <p><label>Appointment date <input type="date" name="appointment_date" required></label></p>
    <p><label>Patient ID <input type="text" name="patient_id" required></label></p>
    <p><label>Age group
      <select name="age">
        <option value="0-10">0-10</option>
        <option value="10-20">10-20</option>
        <option value="20-30">20-30</option>
        <option value="30-40">30-40</option>
        <option value="40-50">40-50</option>
        <option value="50-60">50-60</option>
        <option value="60+">60+</option>
      </select>
    </label></p>
    <p><label>Gender
      <select name="gender">
        <option value="F">F</option>
        <option value="M">M</option>
        <option value="Other">Other</option>
      </select>
    </label></p>
    <p><label>Diagnosis <input type="text" name="diagnosis" required></label></p>
    <p><button type="submit">Add visit</button></p>
  </form>
  <p><a href="/dashboard">View dashboard</a></p>
</body>
</html>
"#;

/// Renders the dashboard page around an already-rendered chart.
///
/// `age_group` and `gender` are the active filter values (sentinel `all`
/// when unconstrained) and are echoed back into the filter form.
pub fn dashboard_page(age_group: &str, gender: &str, chart_svg: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>VisitLog - Dashboard</title>
</head>
<body>
  <h1>Diagnosis Dashboard</h1>
  <form action="/dashboard" method="get">
    <label>Age group <input type="text" name="age_group" value="{age}"></label>
    <label>Gender <input type="text" name="gender" value="{gender}"></label>
    <button type="submit">Apply filters</button>
  </form>
  <div>
{chart}
  </div>
  <p><a href="/">Add another visit</a></p>
</body>
</html>
"#,
        age = escape_html(age_group),
        gender = escape_html(gender),
        chart = chart_svg,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
