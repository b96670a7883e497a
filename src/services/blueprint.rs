//! Floor plan diagrams.
//!
//! The diagram is a fixed SVG layout labelled with the floor notation. A
//! generation attempt is still made against the AI service, but its text is
//! only logged and never changes the drawing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;

use super::ai_client::AiClient;
use super::insights::format_area;
use crate::domain::{Blueprint, FloorSpec};

const FLOOR_NAME: &str = "Standard Layout";

const SVG_TEMPLATE: &str = r##"
<svg viewBox="0 0 800 600" xmlns="http://www.w3.org/2000/svg" style="background:#1a1a2e;">
    <rect x="50" y="50" width="700" height="500" fill="none" stroke="#6C63FF" stroke-width="4"/>

    <rect x="50" y="50" width="250" height="200" fill="none" stroke="#4a4e69" stroke-width="2"/>
    <text x="70" y="80" fill="#a5a6c4" font-family="Arial" font-size="14">MASTER BEDROOM</text>
    <text x="70" y="100" fill="#6C63FF" font-family="Arial" font-size="12">14' x 16'</text>

    <rect x="300" y="50" width="250" height="200" fill="none" stroke="#4a4e69" stroke-width="2"/>
    <text x="320" y="80" fill="#a5a6c4" font-family="Arial" font-size="14">BEDROOM 2</text>
    <text x="320" y="100" fill="#6C63FF" font-family="Arial" font-size="12">14' x 14'</text>

    <rect x="550" y="50" width="200" height="300" fill="none" stroke="#4a4e69" stroke-width="2"/>
    <text x="570" y="80" fill="#a5a6c4" font-family="Arial" font-size="14">LIVING ROOM</text>
    <text x="570" y="100" fill="#6C63FF" font-family="Arial" font-size="12">18' x 20'</text>

    <rect x="50" y="250" width="250" height="300" fill="none" stroke="#4a4e69" stroke-width="2"/>
    <text x="70" y="280" fill="#a5a6c4" font-family="Arial" font-size="14">KITCHEN</text>
    <text x="70" y="300" fill="#6C63FF" font-family="Arial" font-size="12">12' x 14'</text>

    <rect x="300" y="250" width="250" height="150" fill="none" stroke="#4a4e69" stroke-width="2"/>
    <text x="320" y="280" fill="#a5a6c4" font-family="Arial" font-size="14">BATHROOM</text>

    <rect x="300" y="400" width="450" height="150" fill="none" stroke="#4a4e69" stroke-width="2"/>
    <text x="320" y="430" fill="#a5a6c4" font-family="Arial" font-size="14">BALCONY / UTILITY</text>

    <text x="400" y="580" text-anchor="middle" fill="#6C63FF" font-size="12">
        GENERATED BLUEPRINT | SCALE 1:100 | {floors}
    </text>
</svg>
"##;

#[derive(Clone)]
pub struct BlueprintProvider {
    client: AiClient,
    timeout: Duration,
}

impl BlueprintProvider {
    pub fn new(client: AiClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn get_blueprint(&self, floors: &FloorSpec, area: f64) -> Blueprint {
        let prompt = layout_prompt(floors, area);

        match self.client.generate(&prompt, self.timeout).await {
            Ok(text) => {
                tracing::debug!(
                    chars = text.as_deref().map_or(0, str::len),
                    "Layout description received; drawing standard layout"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI layout generation unavailable, drawing standard layout");
            }
        }

        Blueprint {
            floor_name: FLOOR_NAME.to_string(),
            image_url: render_svg(floors),
        }
    }
}

fn layout_prompt(floors: &FloorSpec, area: f64) -> String {
    format!(
        "Generate a text description for a floor plan layout for a {floors} building \
         with {} sq yards area. List rooms and approximate dimensions.",
        format_area(area)
    )
}

/// Standard layout as a base64 `data:` URI.
pub fn render_svg(floors: &FloorSpec) -> String {
    let svg = SVG_TEMPLATE.replace("{floors}", floors.canonical());
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai_client::test_support::{spawn_generator, Behaviour, UNREACHABLE_URL};
    use std::time::Instant;

    fn decode(uri: &str) -> String {
        let payload = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
        String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap()
    }

    #[test]
    fn svg_is_labelled_with_floor_notation() {
        let svg = decode(&render_svg(&FloorSpec::parse("3")));
        assert!(svg.contains("GENERATED BLUEPRINT | SCALE 1:100 | G+2"));
        assert!(svg.contains("MASTER BEDROOM"));
        assert!(!svg.contains("{floors}"));
    }

    #[tokio::test]
    async fn generated_text_never_changes_the_drawing() {
        let floors = FloorSpec::parse("G+1");
        let url = spawn_generator(Behaviour::Reply("Six rooms, 40 x 60 ft")).await;
        let online = BlueprintProvider::new(
            AiClient::new(&url, "granite3.3:2b", true).unwrap(),
            Duration::from_secs(2),
        );
        let offline = BlueprintProvider::new(
            AiClient::new(UNREACHABLE_URL, "granite3.3:2b", true).unwrap(),
            Duration::from_secs(2),
        );

        let a = online.get_blueprint(&floors, 1000.0).await;
        let b = offline.get_blueprint(&floors, 9000.0).await;
        assert_eq!(a, b);
        assert_eq!(a.floor_name, "Standard Layout");
        assert_eq!(a.image_url, render_svg(&floors));
    }

    #[tokio::test]
    async fn stalled_service_is_abandoned_after_timeout() {
        let floors = FloorSpec::parse("G+3");
        let url = spawn_generator(Behaviour::Stall(Duration::from_secs(3))).await;
        let provider = BlueprintProvider::new(
            AiClient::new(&url, "granite3.3:2b", true).unwrap(),
            Duration::from_secs(1),
        );

        let started = Instant::now();
        let blueprint = provider.get_blueprint(&floors, 1000.0).await;

        assert!(started.elapsed() < Duration::from_millis(2500), "{:?}", started.elapsed());
        assert_eq!(blueprint.floor_name, "Standard Layout");
        assert_eq!(blueprint.image_url, render_svg(&floors));
    }

    #[test]
    fn prompt_keeps_a_decimal_on_whole_areas() {
        let prompt = layout_prompt(&FloorSpec::parse("G+1"), 1000.0);
        assert!(prompt.contains("a G+1 building with 1000.0 sq yards area"), "{prompt}");
    }
}
