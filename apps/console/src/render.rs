//! # テキスト描画
//!
//! ブラウザ版のテーブル・モーダルに相当する、一覧と詳細の
//! プレーンテキスト描画。タイムスタンプは元画面と同じく
//! America/La_Paz（UTC-4）で表示する。

use chrono::{DateTime, FixedOffset, Utc};

use cliniflow_domain::bitacora::BitacoraEntry;
use cliniflow_infra::client::{GrupoDto, PacienteDto, PlanDto, RolDto};

/// 欠落値のプレースホルダ（元画面の表示に合わせる）
const EMPTY: &str = "—";

fn fmt_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
   let Some(ts) = timestamp else {
      return EMPTY.to_string();
   };
   let la_paz = FixedOffset::west_opt(4 * 3600).expect("UTC-4 は常に有効なオフセット");
   ts.with_timezone(&la_paz).format("%d/%m/%Y %H:%M:%S").to_string()
}

fn or_empty(value: &str) -> &str {
   if value.is_empty() { EMPTY } else { value }
}

/// 監査ログ一覧を描画する
pub fn render_entries(entries: &[BitacoraEntry]) -> String {
   if entries.is_empty() {
      return "No hay registros en la bitácora".to_string();
   }

   let mut out = format!(
      "{:<8} {:<20} {:<16} {:<16} {:<20} {:<15}\n",
      "ID", "Fecha/Hora", "Usuario", "Acción", "Objeto", "IP"
   );
   for entry in entries {
      out.push_str(&format!(
         "{:<8} {:<20} {:<16} {:<16} {:<20} {:<15}\n",
         entry.id,
         fmt_timestamp(entry.timestamp),
         or_empty(&entry.usuario),
         or_empty(&entry.accion),
         or_empty(&entry.objeto),
         entry.ip.as_deref().unwrap_or(EMPTY),
      ));
   }
   out
}

/// 監査ログ詳細（`extra` 込み）を描画する
pub fn render_detail(entry: &BitacoraEntry) -> String {
   let extra = entry
      .extra
      .as_ref()
      .and_then(|v| serde_json::to_string_pretty(v).ok())
      .unwrap_or_else(|| EMPTY.to_string());

   format!(
      "Detalle registro #{}\n  Fecha/Hora: {}\n  Usuario: {}\n  Acción: {}\n  Objeto: {}\n  IP: {}\n  Extra:\n{}",
      entry.id,
      fmt_timestamp(entry.timestamp),
      or_empty(&entry.usuario),
      or_empty(&entry.accion),
      or_empty(&entry.objeto),
      entry.ip.as_deref().unwrap_or(EMPTY),
      extra,
   )
}

/// ロール一覧を描画する
pub fn render_roles(roles: &[RolDto]) -> String {
   if roles.is_empty() {
      return "No hay roles".to_string();
   }
   roles
      .iter()
      .map(|r| format!("{:<6} {}", r.id, or_empty(&r.nombre)))
      .collect::<Vec<_>>()
      .join("\n")
}

/// グループ一覧を描画する
pub fn render_grupos(grupos: &[GrupoDto]) -> String {
   if grupos.is_empty() {
      return "No hay grupos".to_string();
   }
   grupos
      .iter()
      .map(|g| format!("{:<6} {}", g.id, or_empty(&g.name)))
      .collect::<Vec<_>>()
      .join("\n")
}

/// 患者一覧を描画する
pub fn render_pacientes(pacientes: &[PacienteDto]) -> String {
   if pacientes.is_empty() {
      return "No hay pacientes registrados".to_string();
   }
   pacientes
      .iter()
      .map(|p| {
         format!(
            "{:<6} {} {} (CI: {})",
            p.id,
            or_empty(&p.nombre),
            or_empty(&p.apellido),
            p.ci.as_deref().unwrap_or(EMPTY),
         )
      })
      .collect::<Vec<_>>()
      .join("\n")
}

/// 購読プラン一覧を描画する
pub fn render_planes(planes: &[PlanDto]) -> String {
   if planes.is_empty() {
      return "No se pudieron cargar los planes disponibles.".to_string();
   }
   planes
      .iter()
      .map(|p| {
         format!(
            "{:<6} {:<20} {}",
            p.id,
            or_empty(&p.nombre),
            p.precio.as_deref().unwrap_or(EMPTY),
         )
      })
      .collect::<Vec<_>>()
      .join("\n")
}

/// ゆるい JSON ペイロードを整形して描画する
pub fn render_value(value: &serde_json::Value) -> String {
   serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
   use chrono::TimeZone;
   use pretty_assertions::assert_eq;

   use cliniflow_domain::bitacora::BitacoraId;

   use super::*;

   fn entry() -> BitacoraEntry {
      BitacoraEntry {
         id: BitacoraId::new(3),
         // UTC 14:30 は La Paz では 10:30
         timestamp: Some(Utc.with_ymd_and_hms(2024, 8, 7, 14, 30, 0).unwrap()),
         usuario: "ana".to_string(),
         accion: "LOGIN".to_string(),
         objeto: String::new(),
         ip: None,
         extra: Some(serde_json::json!({"navegador": "firefox"})),
      }
   }

   #[test]
   fn test_一覧はla_paz時刻と欠落プレースホルダを描画する() {
      let rendered = render_entries(&[entry()]);

      assert!(rendered.contains("07/08/2024 10:30:00"));
      assert!(rendered.contains("ana"));
      assert!(rendered.contains(EMPTY));
   }

   #[test]
   fn test_空の一覧は空メッセージになる() {
      assert_eq!(render_entries(&[]), "No hay registros en la bitácora");
   }

   #[test]
   fn test_詳細はextraを整形して含む() {
      let rendered = render_detail(&entry());

      assert!(rendered.starts_with("Detalle registro #3"));
      assert!(rendered.contains("\"navegador\": \"firefox\""));
   }

   #[test]
   fn test_extraのない詳細はプレースホルダを出す() {
      let mut e = entry();
      e.extra = None;

      assert!(render_detail(&e).contains(EMPTY));
   }
}
