//! # クライアント DTO
//!
//! ワイヤ形式（バックエンドのスペイン語フィールド名）をそのまま写した
//! データ転送オブジェクト。コアロジックに渡す前にドメイン型へ変換する。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cliniflow_domain::voice::VoiceAction;

/// ロール一覧の要素
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RolDto {
   pub id: i64,
   #[serde(default)]
   pub nombre: String,
   #[serde(default)]
   pub descripcion: Option<String>,
}

/// グループ一覧の要素（Django の Group）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrupoDto {
   pub id: i64,
   #[serde(default)]
   pub name: String,
}

/// ユーザー作成リクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuevoUsuario {
   pub username: String,
   pub email:    String,
   pub password: String,
   pub rol:      i64,
   #[serde(skip_serializing_if = "Vec::is_empty")]
   pub grupos:   Vec<i64>,
}

/// 患者一覧の要素
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PacienteDto {
   pub id: i64,
   #[serde(default)]
   pub nombre: String,
   #[serde(default)]
   pub apellido: String,
   #[serde(default)]
   pub ci: Option<String>,
   #[serde(default)]
   pub telefono: Option<String>,
}

/// 購読プラン（公開エンドポイント）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanDto {
   pub id: i64,
   #[serde(default)]
   pub nombre: String,
   #[serde(default)]
   pub precio: Option<String>,
   #[serde(default)]
   pub descripcion: Option<String>,
}

/// AI レポート生成のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct ReporteIaDto {
   pub reporte_generado: String,
}

/// 音声コマンド解釈のワイヤ形式
///
/// 成功時は `accion` でタグ付けされ、ドメインレベルの失敗は
/// `{ "error": "..." }` だけが返る。両者を untagged で受ける。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InterpreterReplyDto {
   Accion(AccionDto),
   Fallo { error: String },
}

/// 解釈されたアクションのワイヤ形式
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "accion")]
pub enum AccionDto {
   #[serde(rename = "descargar")]
   Descargar {
      url: String,
      #[serde(rename = "fileName")]
      file_name: String,
      #[serde(default)]
      params: BTreeMap<String, String>,
      #[serde(default)]
      reporte_id: Option<String>,
   },
   #[serde(rename = "navegar")]
   Navegar {
      url: String,
      #[serde(default)]
      params: BTreeMap<String, String>,
      #[serde(default)]
      reporte_id: Option<String>,
   },
}

impl From<InterpreterReplyDto> for VoiceAction {
   fn from(reply: InterpreterReplyDto) -> Self {
      match reply {
         InterpreterReplyDto::Accion(AccionDto::Descargar {
            url,
            file_name,
            params,
            reporte_id,
         }) => VoiceAction::Download {
            url,
            file_name,
            params,
            reporte_id,
         },
         InterpreterReplyDto::Accion(AccionDto::Navegar {
            url,
            params,
            reporte_id,
         }) => VoiceAction::Navigate {
            url,
            params,
            reporte_id,
         },
         InterpreterReplyDto::Fallo { error } => VoiceAction::Failure { message: error },
      }
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use serde_json::json;

   use super::*;

   #[test]
   fn test_descargarアクションがドメイン型に変換される() {
      let value = json!({
         "accion": "descargar",
         "url": "/reportes/citas",
         "fileName": "citas.pdf",
         "params": {"fecha": "2024-05-01"}
      });

      let reply: InterpreterReplyDto = serde_json::from_value(value).unwrap();
      let action = VoiceAction::from(reply);

      let VoiceAction::Download {
         url,
         file_name,
         params,
         reporte_id,
      } = action
      else {
         panic!("Download を期待した");
      };
      assert_eq!(url, "/reportes/citas");
      assert_eq!(file_name, "citas.pdf");
      assert_eq!(params.get("fecha").map(String::as_str), Some("2024-05-01"));
      assert_eq!(reporte_id, None);
   }

   #[test]
   fn test_navegarアクションはparams省略でも読める() {
      let value = json!({
         "accion": "navegar",
         "url": "/dashboard/reportes",
         "reporte_id": "citas_hoy"
      });

      let reply: InterpreterReplyDto = serde_json::from_value(value).unwrap();
      let action = VoiceAction::from(reply);

      assert_eq!(
         action,
         VoiceAction::Navigate {
            url:        "/dashboard/reportes".to_string(),
            params:     BTreeMap::new(),
            reporte_id: Some("citas_hoy".to_string()),
         }
      );
   }

   #[test]
   fn test_errorだけのレスポンスはfailureになる() {
      let value = json!({"error": "Comando no reconocido"});

      let reply: InterpreterReplyDto = serde_json::from_value(value).unwrap();
      let action = VoiceAction::from(reply);

      assert_eq!(
         action,
         VoiceAction::Failure {
            message: "Comando no reconocido".to_string(),
         }
      );
   }

   #[test]
   fn test_未知のaccionはデシリアライズに失敗する() {
      let value = json!({"accion": "imprimir", "url": "/x"});

      let result: Result<InterpreterReplyDto, _> = serde_json::from_value(value);

      assert!(result.is_err());
   }

   #[test]
   fn test_nuevo_usuarioはgruposが空なら省略して直列化する() {
      let nuevo = NuevoUsuario {
         username: "ana".to_string(),
         email:    "ana@clinica.bo".to_string(),
         password: "secreta".to_string(),
         rol:      2,
         grupos:   Vec::new(),
      };

      let value = serde_json::to_value(&nuevo).unwrap();

      assert_eq!(value.get("grupos"), None);
      assert_eq!(value["rol"], 2);
   }
}
