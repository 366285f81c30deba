// templates/pages/home.rs

use crate::templates::{address_form, card, desktop_layout};
use maud::{html, Markup, PreEscaped};

const LOOKUP_SCRIPT: &str = r#"
const form = document.getElementById('lookup-form');
const output = document.getElementById('lookup-result');

function escapeHtml(value) {
  const div = document.createElement('div');
  div.textContent = value == null ? '' : String(value);
  return div.innerHTML;
}

function cell(label, value) {
  return `<div><span>${escapeHtml(label)}</span>${escapeHtml(value)}</div>`;
}

function render(data) {
  const p = data.parcel;
  const g = data.geocode;
  let html = `<p><span class="badge ${escapeHtml(p.dataSource)}">${escapeHtml(p.dataSource)}</span> ${escapeHtml(p.provider)}</p>`;
  if (data.notice) {
    html += `<p class="notice">${escapeHtml(data.notice)}</p>`;
  }
  html += '<div class="result-grid">';
  html += cell('Parcel ID', p.parcelId);
  html += cell('Owner', p.owner);
  html += cell('Acres', p.acres);
  html += cell('Zoning', p.zoning);
  html += cell('Municipality', p.municipality);
  html += cell('Situs', p.situs);
  html += cell('Land Use', p.landUse);
  html += cell('Assessment', p.assessment);
  html += cell('County', p.county);
  html += cell('Coordinates', `${g.lat.toFixed(5)}, ${g.lon.toFixed(5)}`);
  html += '</div>';
  html += `<p><small>${escapeHtml(g.displayName)}</small></p>`;
  output.innerHTML = html;
}

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  const button = form.querySelector('button');
  const address = document.getElementById('address').value.trim();
  button.disabled = true;
  output.innerHTML = '<p>Looking up…</p>';
  try {
    const res = await fetch('/api/lookup', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ address }),
    });
    const data = await res.json();
    if (!res.ok) {
      const hint = data.details ? ` (${data.details})` : '';
      output.innerHTML = `<p class="error">${escapeHtml(data.error)}${escapeHtml(hint)}</p>`;
    } else {
      render(data);
    }
  } catch (err) {
    output.innerHTML = `<p class="error">Request failed: ${escapeHtml(err.message)}</p>`;
  } finally {
    button.disabled = false;
  }
});
"#;

pub fn home_page() -> Markup {
    desktop_layout(
        "Property Lookup",
        html! {
            (card("Pennsylvania parcel lookup", html! {
                p { "Enter a property address to find its parcel, owner, zoning and assessment." }
                (address_form())
            }))

            (card("Result", html! {
                div id="lookup-result" {
                    p { "No lookup yet." }
                }
            }))

            script { (PreEscaped(LOOKUP_SCRIPT)) }
        },
    )
}
