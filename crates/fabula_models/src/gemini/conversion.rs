//! Conversions between the Fabula request model and Gemini wire DTOs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use fabula_core::{
    GenerateRequest, GenerateResponse, Input, MediaSource, Modality, Output, Role,
};
use fabula_error::{GeminiError, GeminiErrorKind};

use super::GeminiResult;
use super::dto::{
    Blob, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn modality_name(modality: Modality) -> &'static str {
    match modality {
        Modality::Text => "TEXT",
        Modality::Image => "IMAGE",
    }
}

fn input_to_part(input: &Input) -> GeminiResult<Part> {
    match input {
        Input::Text(text) => Ok(Part {
            text: Some(text.clone()),
            ..Default::default()
        }),
        Input::Image { mime, source } => {
            let mime_type = mime.clone().unwrap_or_else(|| "image/png".to_string());
            let data = match source {
                MediaSource::Binary(bytes) => BASE64.encode(bytes),
                MediaSource::Base64(encoded) => encoded.clone(),
                MediaSource::Url(_) => {
                    return Err(GeminiError::new(GeminiErrorKind::UrlMediaNotSupported));
                }
            };
            Ok(Part {
                inline_data: Some(Blob { mime_type, data }),
                ..Default::default()
            })
        }
    }
}

/// Convert a generation request into the wire request body.
pub fn convert_request(req: &GenerateRequest) -> GeminiResult<GenerateContentRequest> {
    let contents = req
        .messages
        .iter()
        .map(|msg| {
            let parts = msg
                .content
                .iter()
                .map(input_to_part)
                .collect::<GeminiResult<Vec<_>>>()?;
            Ok(Content {
                role: Some(role_name(msg.role).to_string()),
                parts,
            })
        })
        .collect::<GeminiResult<Vec<_>>>()?;

    // A schema implies a JSON-typed response body; modalities pass through.
    let generation_config = if req.temperature.is_some()
        || req.max_tokens.is_some()
        || req.response_schema.is_some()
        || req.response_modalities.is_some()
    {
        Some(GenerationConfig {
            temperature: req.temperature,
            max_output_tokens: req.max_tokens,
            response_mime_type: req
                .response_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema: req.response_schema.clone(),
            response_modalities: req.response_modalities.as_ref().map(|modalities| {
                modalities
                    .iter()
                    .map(|m| modality_name(*m).to_string())
                    .collect()
            }),
        })
    } else {
        None
    };

    Ok(GenerateContentRequest {
        contents,
        generation_config,
    })
}

/// Convert the wire response body into a generation response.
///
/// Parts are mapped in order; text parts become [`Output::Text`], inline
/// data becomes [`Output::Image`] with the base64 payload decoded.
pub fn convert_response(response: GenerateContentResponse) -> GeminiResult<GenerateResponse> {
    let mut outputs = Vec::new();
    for candidate in response.candidates {
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts {
            if let Some(text) = part.text {
                outputs.push(Output::Text(text));
            }
            if let Some(blob) = part.inline_data {
                let data = BASE64
                    .decode(blob.data.as_bytes())
                    .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
                outputs.push(Output::Image {
                    mime: Some(blob.mime_type),
                    data,
                });
            }
        }
    }
    Ok(GenerateResponse { outputs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_core::Message;
    use serde_json::json;

    #[test]
    fn text_request_serializes_to_camel_case() {
        let req = GenerateRequest {
            messages: vec![Message::user_text("a theme")],
            temperature: Some(0.8),
            response_schema: Some(json!({"type": "object"})),
            ..Default::default()
        };
        let body = convert_request(&req).unwrap();
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "a theme");
        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "object");
        assert!(config.get("responseModalities").is_none());
    }

    #[test]
    fn image_conditioning_becomes_inline_data() {
        let req = GenerateRequest {
            messages: vec![Message {
                role: Role::User,
                content: vec![
                    Input::Image {
                        mime: Some("image/png".to_string()),
                        source: MediaSource::Binary(vec![1, 2, 3]),
                    },
                    Input::Text("continue the story".to_string()),
                ],
            }],
            response_modalities: Some(vec![Modality::Image, Modality::Text]),
            ..Default::default()
        };
        let value = serde_json::to_value(convert_request(&req).unwrap()).unwrap();

        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert_eq!(parts[1]["text"], "continue the story");
        assert_eq!(
            value["generationConfig"]["responseModalities"],
            json!(["IMAGE", "TEXT"])
        );
    }

    #[test]
    fn url_media_is_rejected() {
        let req = GenerateRequest {
            messages: vec![Message {
                role: Role::User,
                content: vec![Input::Image {
                    mime: None,
                    source: MediaSource::Url("https://example.com/a.png".to_string()),
                }],
            }],
            ..Default::default()
        };
        assert!(convert_request(&req).is_err());
    }

    #[test]
    fn response_parts_map_to_outputs() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "here is your picture"},
                        {"inlineData": {"mimeType": "image/png", "data": "AQID"}}
                    ]
                }
            }]
        });
        let dto: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let response = convert_response(dto).unwrap();

        assert_eq!(response.first_text(), Some("here is your picture"));
        let (mime, data) = response.first_image().unwrap();
        assert_eq!(mime, Some("image/png"));
        assert_eq!(data, &[1, 2, 3]);
    }

    #[test]
    fn invalid_base64_payload_is_an_error() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "!!!"}}]
                }
            }]
        });
        let dto: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert!(convert_response(dto).is_err());
    }

    #[test]
    fn empty_candidates_yield_no_outputs() {
        let response = convert_response(GenerateContentResponse::default()).unwrap();
        assert!(response.outputs.is_empty());
    }
}
