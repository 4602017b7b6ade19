use schema_typedef::cli::render_declaration;
use schema_typedef::{generate_type_definition, Codegen, Document, Error, Schema};
use serde_json::json;

const DOCUMENT: &str = r##"{
    "openapi": "3.1.0",
    "components": {
        "schemas": {
            "Status": { "type": "string", "enum": ["active", "archived"] },
            "Point": {
                "type": "array",
                "prefixItems": [{ "type": "number" }, { "type": "number" }],
                "items": false
            },
            "Labels": {
                "type": "object",
                "propertyNames": { "type": "string" },
                "additionalProperties": { "type": "string" }
            },
            "Shape": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "description": "Primary key" },
                    "status": { "$ref": "#/components/schemas/Status" },
                    "path": { "type": "array", "items": { "$ref": "#/components/schemas/Point" } },
                    "parent": { "oneOf": [{ "$ref": "#/components/schemas/Shape" }, { "type": "null" }] }
                },
                "required": ["id", "path"]
            }
        }
    }
}"##;

#[test]
fn declarations_for_a_whole_document() {
    let document: Document = DOCUMENT.parse().unwrap();
    let rendered: Vec<String> = document
        .definitions(&Codegen::new())
        .into_iter()
        .map(|(name, def)| render_declaration(name, &def.unwrap(), true))
        .collect();

    assert_eq!(rendered[0], r#"export type Status = "active" | "archived";"#);
    assert_eq!(rendered[1], "export type Point = [number, number];");
    assert_eq!(rendered[2], "export type Labels = Record<string, string>;");

    let shape = [
        "export type Shape = {",
        "  /**",
        "   * Primary key",
        "   */",
        "  id: number,",
        "  /**",
        "   * missing-description",
        "   */",
        "  status?: Status,",
        "  /**",
        "   * missing-description",
        "   */",
        "  path: Point[],",
        "  /**",
        "   * missing-description",
        "   */",
        "  parent?: (Shape | null),",
        "};",
    ]
    .join("\n");
    assert_eq!(rendered[3], shape);
}

#[test]
fn dependencies_are_collected_in_encounter_order() {
    let document: Document = DOCUMENT.parse().unwrap();
    let (_, shape) = document.schemas().nth(3).unwrap();
    let def = Codegen::new().generate(shape).unwrap();
    assert_eq!(def.dependencies, ["Status", "Point", "Shape"]);
}

#[test]
fn indentation_offsets_object_bodies() {
    let schema = Schema::from_value(&json!({
        "type": "object",
        "properties": { "a": { "type": "boolean" } },
        "required": ["a"],
    }))
    .unwrap();
    let def = generate_type_definition(&schema, 1).unwrap();
    assert_eq!(def.body, "{\n    /**\n     * missing-description\n     */\n    a: boolean,\n  }");
}

#[test]
fn errors_surface_to_the_caller() {
    let schema = Schema::from_value(&json!({
        "type": "object",
        "properties": { "bad": { "$ref": "#/components/schemas/" } },
    }))
    .unwrap();
    let err = generate_type_definition(&schema, 0).unwrap_err();
    assert_eq!(err, Error::InvalidReference("#/components/schemas/".to_string()));
}
