use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; background: #f6f7fb; }
header { display: flex; align-items: center; gap: .75rem; padding: .75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
header h3 { margin: 0; }
main { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.card { background: #fff; border-radius: 8px; padding: 1.25rem 1.5rem; margin-bottom: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.card h2 { margin-top: 0; font-size: 1.2rem; }
.lookup-form { display: flex; gap: .5rem; }
.lookup-form input { flex: 1; padding: .6rem .75rem; font-size: 1rem; border: 1px solid #ccc; border-radius: 6px; }
.lookup-form button { padding: .6rem 1.2rem; font-size: 1rem; border: 0; border-radius: 6px; background: #524ed2; color: #fff; cursor: pointer; }
.lookup-form button:disabled { opacity: .6; cursor: wait; }
.result-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: .75rem; }
.result-grid div { background: #f4f4f8; border-radius: 6px; padding: .6rem .75rem; }
.result-grid span { display: block; font-size: .75rem; text-transform: uppercase; color: #666; }
.badge { display: inline-block; padding: .15rem .5rem; border-radius: 999px; font-size: .8rem; background: #e0e7ff; }
.badge.demo { background: #fff3cd; }
.badge.partial { background: #ffe5d0; }
.sr-only { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0 0 0 0); }
.notice { color: #8a5a00; }
.error { color: #b00020; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { "Property Lookup" }
                }
                main { (content) }
            }
        }
    }
}
