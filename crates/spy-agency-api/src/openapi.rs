// SPDX-License-Identifier: Apache-2.0

use crate::error_mapping::API_ERROR_SCHEMA_REF;
use crate::ApiErrorCode;
use serde_json::{json, Value};

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": API_ERROR_SCHEMA_REF}}}
    })
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{schema}")}}}
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": schema}}
    })
}

fn schema_ref(name: &str) -> Value {
    json!({"$ref": format!("#/components/schemas/{name}")})
}

fn array_of(name: &str) -> Value {
    json!({"type": "array", "items": schema_ref(name)})
}

fn id_param(name: &str) -> Value {
    json!({"name": name, "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}})
}

#[must_use]
pub fn openapi_v1_spec() -> Value {
    let codes: Vec<&str> = ApiErrorCode::ALL.iter().map(|c| c.as_str()).collect();
    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "Spy Cat Agency API",
        "version": "v1"
      },
      "paths": {
        "/": {"get": {"responses": {"200": json_response("service banner", schema_ref("ServiceInfo"))}}},
        "/healthz": {"get": {"responses": {"200": {"description": "ok"}}}},
        "/openapi.json": {"get": {"responses": {"200": {"description": "this document"}}}},
        "/spy_cats": {
          "get": {"responses": {"200": json_response("spy cats with their missions", array_of("SpyCat"))}},
          "post": {
            "requestBody": json_body("CreateSpyCatRequest"),
            "responses": {
              "201": json_response("spy cat created", schema_ref("SpyCat")),
              "400": error_response("invalid input or unknown breed"),
              "500": error_response("breed catalog unavailable")
            }
          }
        },
        "/spy_cats/{cat_id}": {
          "get": {
            "parameters": [id_param("cat_id")],
            "responses": {
              "200": json_response("spy cat", schema_ref("SpyCat")),
              "404": error_response("spy cat not found")
            }
          },
          "delete": {
            "parameters": [id_param("cat_id")],
            "responses": {
              "204": {"description": "spy cat and its missions deleted"},
              "404": error_response("spy cat not found")
            }
          }
        },
        "/spy_cats/{cat_id}/salary": {
          "put": {
            "parameters": [id_param("cat_id")],
            "requestBody": json_body("UpdateSalaryRequest"),
            "responses": {
              "200": json_response("salary updated", schema_ref("SpyCat")),
              "400": error_response("negative salary"),
              "404": error_response("spy cat not found")
            }
          }
        },
        "/missions": {
          "get": {"responses": {"200": json_response("missions with their targets", array_of("Mission"))}},
          "post": {
            "requestBody": json_body("CreateMissionRequest"),
            "responses": {
              "201": json_response("mission created", schema_ref("Mission")),
              "400": error_response("target count out of range or cat busy"),
              "404": error_response("spy cat not found")
            }
          }
        },
        "/missions/{mission_id}": {
          "get": {
            "parameters": [id_param("mission_id")],
            "responses": {
              "200": json_response("mission", schema_ref("Mission")),
              "404": error_response("mission not found")
            }
          },
          "delete": {
            "parameters": [id_param("mission_id")],
            "responses": {
              "204": {"description": "mission and targets deleted"},
              "400": error_response("mission is assigned"),
              "404": error_response("mission not found")
            }
          }
        },
        "/missions/{mission_id}/targets": {
          "put": {
            "parameters": [id_param("mission_id")],
            "requestBody": json_body("UpdateTargetsRequest"),
            "responses": {
              "200": json_response("notes updated", schema_ref("Mission")),
              "400": error_response("target already completed"),
              "404": error_response("mission or target not found")
            }
          }
        },
        "/missions/{mission_id}/assign": {
          "put": {
            "parameters": [id_param("mission_id")],
            "requestBody": json_body("AssignCatRequest"),
            "responses": {
              "200": json_response("spy cat assigned", schema_ref("Mission")),
              "400": error_response("mission assigned or cat busy"),
              "404": error_response("mission or spy cat not found")
            }
          }
        },
        "/missions/mark_target_complete/{target_id}": {
          "post": {
            "parameters": [id_param("target_id")],
            "responses": {
              "200": json_response("target completed", schema_ref("Target")),
              "400": error_response("target already completed"),
              "404": error_response("target not found")
            }
          }
        }
      },
      "components": {
        "schemas": {
          "ApiErrorCode": {"type": "string", "enum": codes},
          "ApiError": {
            "type": "object",
            "required": ["code", "message", "details", "request_id"],
            "additionalProperties": false,
            "properties": {
              "code": schema_ref("ApiErrorCode"),
              "message": {"type": "string"},
              "details": {"type": "object"},
              "request_id": {"type": "string"}
            }
          },
          "ApiErrorEnvelope": {
            "type": "object",
            "required": ["error"],
            "additionalProperties": false,
            "properties": {"error": schema_ref("ApiError")}
          },
          "AssignCatRequest": {
            "type": "object",
            "required": ["cat_id"],
            "additionalProperties": false,
            "properties": {"cat_id": {"type": "integer", "format": "int64"}}
          },
          "CompleteState": {"type": "string", "enum": ["in_progress", "completed"]},
          "CreateMissionRequest": {
            "type": "object",
            "required": ["targets"],
            "additionalProperties": false,
            "properties": {
              "spy_cat_id": {"type": "integer", "format": "int64", "nullable": true},
              "targets": {"type": "array", "minItems": 1, "maxItems": 3, "items": schema_ref("CreateTargetRequest")}
            }
          },
          "CreateSpyCatRequest": {
            "type": "object",
            "required": ["name", "years_of_experience", "breed", "salary"],
            "additionalProperties": false,
            "properties": {
              "name": {"type": "string", "maxLength": 255},
              "years_of_experience": {"type": "integer", "minimum": 0},
              "breed": {"type": "string", "maxLength": 511},
              "salary": {"type": "integer", "minimum": 0}
            }
          },
          "CreateTargetRequest": {
            "type": "object",
            "required": ["name", "country"],
            "additionalProperties": false,
            "properties": {
              "name": {"type": "string", "maxLength": 255},
              "country": {"type": "string", "maxLength": 255},
              "notes": {"type": "string", "maxLength": 2047, "nullable": true}
            }
          },
          "Mission": {
            "type": "object",
            "required": ["id", "complete_state", "spy_cat_id", "targets"],
            "properties": {
              "id": {"type": "integer", "format": "int64"},
              "complete_state": schema_ref("CompleteState"),
              "spy_cat_id": {"type": "integer", "format": "int64", "nullable": true},
              "targets": array_of("Target")
            }
          },
          "ServiceInfo": {
            "type": "object",
            "required": ["message"],
            "properties": {"message": {"type": "string"}}
          },
          "SpyCat": {
            "type": "object",
            "required": ["id", "name", "years_of_experience", "breed", "salary", "missions"],
            "properties": {
              "id": {"type": "integer", "format": "int64"},
              "name": {"type": "string"},
              "years_of_experience": {"type": "integer"},
              "breed": {"type": "string"},
              "salary": {"type": "integer"},
              "missions": array_of("Mission")
            }
          },
          "Target": {
            "type": "object",
            "required": ["id", "mission_id", "name", "country", "notes", "complete_state"],
            "properties": {
              "id": {"type": "integer", "format": "int64"},
              "mission_id": {"type": "integer", "format": "int64"},
              "name": {"type": "string"},
              "country": {"type": "string"},
              "notes": {"type": "string", "nullable": true},
              "complete_state": schema_ref("CompleteState")
            }
          },
          "TargetNotesRequest": {
            "type": "object",
            "required": ["id"],
            "additionalProperties": false,
            "properties": {
              "id": {"type": "integer", "format": "int64"},
              "notes": {"type": "string", "maxLength": 2047, "nullable": true}
            }
          },
          "UpdateSalaryRequest": {
            "type": "object",
            "required": ["salary"],
            "additionalProperties": false,
            "properties": {"salary": {"type": "integer", "minimum": 0}}
          },
          "UpdateTargetsRequest": {
            "type": "object",
            "required": ["targets"],
            "additionalProperties": false,
            "properties": {"targets": {"type": "array", "items": schema_ref("TargetNotesRequest")}}
          }
        }
      }
    })
}
