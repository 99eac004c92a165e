//! Proxy method synthesis.
//!
//! Each local interface method that the server also exposes becomes one
//! method of the generated proxy class, in one of two shapes:
//!
//! - **Synchronous stub**: same signature, body throws
//!   `NotImplementedException`. Remote calls are only offered asynchronously.
//! - **Asynchronous forwarder**: embeds the server's action descriptor as a
//!   JSON string literal, deserializes it at call time and forwards the
//!   arguments to `MakeRequestAsync`.
//!
//! ## Generated Shape
//!
//! ```text
//!         public async Task<BookDto> GetAsync(int id)
//!         {
//!             #region ActionApiDescriptionModel JSON
//!             var actionApiDescription = "{\"uniqueName\":\"GetAsyncById\",...}";
//!             #endregion
//!
//!             var action = JsonSerializer.Deserialize<ActionApiDescriptionModel>(actionApiDescription);
//!
//!             return await MakeRequestAsync<BookDto>(action, id);
//!         }
//! ```

use proxygen_define::{ActionApiDescriptionModel, MethodSignature};

use crate::errors::GeneratorError;
use crate::type_names::TypeNameContext;

/// Indentation of a member inside the generated class.
const MEMBER_INDENT: &str = "        ";
/// Indentation of a statement inside a generated method body.
const BODY_INDENT: &str = "            ";

/// Name of the generic invocation primitive on the proxy base class.
pub const INVOKE_PRIMITIVE: &str = "MakeRequestAsync";

/// Synthesizes the source text of one proxy method.
///
/// The return type is resolved before the parameters, so imports are
/// registered in signature order. The returned text ends with a newline.
///
/// ## Errors
///
/// Returns [`GeneratorError::Serialize`] if the action descriptor cannot be
/// serialized for embedding.
pub fn synthesize_method(
    context: &mut TypeNameContext,
    action: &ActionApiDescriptionModel,
    method: &MethodSignature,
) -> Result<String, GeneratorError> {
    let return_type = context.resolve(&method.return_type);
    let parameters = parameter_list(context, method);

    if !method.return_type.is_async() {
        return Ok(synchronous_stub(&return_type, &method.name, &parameters));
    }

    let descriptor = embed_action(action)?;
    let arguments: Vec<&str> = std::iter::once("action")
        .chain(method.parameters.iter().map(|p| p.name.as_str()))
        .collect();

    let invocation = match method.return_type.async_payload() {
        Some(payload) => {
            let payload = context.resolve(payload);
            format!(
                "return await {}<{}>({});",
                INVOKE_PRIMITIVE,
                payload,
                arguments.join(", ")
            )
        }
        None => format!("await {}({});", INVOKE_PRIMITIVE, arguments.join(", ")),
    };

    let lines = [
        format!("{MEMBER_INDENT}public async {} {}({})", return_type, method.name, parameters),
        format!("{MEMBER_INDENT}{{"),
        format!("{BODY_INDENT}#region ActionApiDescriptionModel JSON"),
        format!("{BODY_INDENT}var actionApiDescription = {};", descriptor),
        format!("{BODY_INDENT}#endregion"),
        String::new(),
        format!(
            "{BODY_INDENT}var action = JsonSerializer.Deserialize<ActionApiDescriptionModel>(actionApiDescription);"
        ),
        String::new(),
        format!("{BODY_INDENT}{}", invocation),
        format!("{MEMBER_INDENT}}}"),
    ];

    Ok(lines.join("\n") + "\n")
}

/// Resolves every parameter to `Type name`, comma separated.
fn parameter_list(context: &mut TypeNameContext, method: &MethodSignature) -> String {
    method
        .parameters
        .iter()
        .map(|parameter| {
            format!(
                "{} {}",
                context.resolve(&parameter.parameter_type),
                parameter.name
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn synchronous_stub(return_type: &str, name: &str, parameters: &str) -> String {
    let lines = [
        format!("{MEMBER_INDENT}public {} {}({})", return_type, name, parameters),
        format!("{MEMBER_INDENT}{{"),
        format!(
            "{BODY_INDENT}//Client Proxy does not support the synchronization method, you should always use asynchronous methods as a best practice"
        ),
        format!("{BODY_INDENT}throw new System.NotImplementedException();"),
        format!("{MEMBER_INDENT}}}"),
    ];

    lines.join("\n") + "\n"
}

/// Serializes `action` and quotes it as a C# string literal.
pub fn embed_action(action: &ActionApiDescriptionModel) -> Result<String, GeneratorError> {
    let json = serde_json::to_string(action).map_err(|source| GeneratorError::Serialize {
        action: action.unique_name.clone(),
        source,
    })?;
    Ok(csharp_string_literal(&json))
}

/// Quotes `text` as a regular (non-verbatim) C# string literal.
///
/// ```
/// use proxygen_gen::method::csharp_string_literal;
///
/// assert_eq!(csharp_string_literal(r#"{"a":"b\n"}"#), r#""{\"a\":\"b\\n\"}""#);
/// ```
pub fn csharp_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
