//! # REPL コマンド
//!
//! コンソールのコマンド文法と実行ループ。文法は純粋な `FromStr` として
//! 実装し、実行はユースケース層への薄いディスパッチに留める。

use std::{str::FromStr, sync::Arc};

use cliniflow_domain::{
   DomainError,
   bitacora::BitacoraId,
   voice::UiMessage,
};
use cliniflow_infra::client::{BiFilters, BitacoraApi, NuevoUsuario};

use crate::{
   error::ConsoleError,
   render,
   route::ConsoleNavigator,
   typed_capture::TypedCaptureEngine,
   usecase::{AdminUsecase, BitacoraBrowser, DetailViewer, ReportesUsecase, VoiceCommandUsecase},
};

/// コンソールコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
   /// 監査ログの最初のページを読み込む（リセットして再取得）
   Bitacora,
   /// 監査ログの続きを読み込む
   Mas,
   /// 監査ログの詳細を開く
   Detalle(BitacoraId),
   Roles,
   Grupos,
   CrearUsuario(NuevoUsuario),
   Pacientes,
   Historia(i64),
   Bi(BiFilters),
   Etl,
   Backup,
   /// 音声コマンド。`None` は無音（no-speech の経路）
   Voz(Option<String>),
   Ia { cita_id: i64, notas: String },
   Planes,
   Ruta,
   Ayuda,
   Salir,
}

impl FromStr for ConsoleCommand {
   type Err = DomainError;

   fn from_str(line: &str) -> Result<Self, Self::Err> {
      let tokens: Vec<&str> = line.split_whitespace().collect();
      let Some(&command) = tokens.first() else {
         return Err(DomainError::Validation("comando vacío".to_string()));
      };

      match command {
         "bitacora" => Ok(Self::Bitacora),
         "mas" | "más" => Ok(Self::Mas),
         "detalle" => {
            let id = tokens
               .get(1)
               .ok_or_else(|| DomainError::Validation("uso: detalle <id>".to_string()))?;
            Ok(Self::Detalle(id.parse()?))
         }
         "roles" => Ok(Self::Roles),
         "grupos" => Ok(Self::Grupos),
         "crear-usuario" => {
            let [username, email, password, rol] = tokens.get(1..5).and_then(|s| {
               <[&str; 4]>::try_from(s).ok()
            }).ok_or_else(|| {
               DomainError::Validation(
                  "uso: crear-usuario <username> <email> <password> <rol-id>".to_string(),
               )
            })?;
            let rol: i64 = rol.parse().map_err(|_| {
               DomainError::Validation(format!("rol-id numérico inválido: {rol}"))
            })?;
            Ok(Self::CrearUsuario(NuevoUsuario {
               username: username.to_string(),
               email:    email.to_string(),
               password: password.to_string(),
               rol,
               grupos:   Vec::new(),
            }))
         }
         "pacientes" => Ok(Self::Pacientes),
         "historia" => {
            let id = tokens
               .get(1)
               .ok_or_else(|| DomainError::Validation("uso: historia <paciente-id>".to_string()))?;
            let id: i64 = id.parse().map_err(|_| {
               DomainError::Validation(format!("paciente-id numérico inválido: {id}"))
            })?;
            Ok(Self::Historia(id))
         }
         "bi" => Ok(Self::Bi(BiFilters {
            start_date:   tokens.get(1).unwrap_or(&"").to_string(),
            end_date:     tokens.get(2).unwrap_or(&"").to_string(),
            medico:       tokens.get(3).unwrap_or(&"").to_string(),
            especialidad: tokens.get(4).unwrap_or(&"").to_string(),
         })),
         "etl" => Ok(Self::Etl),
         "backup" => Ok(Self::Backup),
         "voz" => {
            let transcript = line
               .strip_prefix("voz")
               .map(str::trim)
               .filter(|t| !t.is_empty())
               .map(String::from);
            Ok(Self::Voz(transcript))
         }
         "ia" => {
            let cita = tokens
               .get(1)
               .ok_or_else(|| DomainError::Validation("uso: ia <cita-id> <notas>".to_string()))?;
            let cita_id: i64 = cita.parse().map_err(|_| {
               DomainError::Validation(format!("cita-id numérico inválido: {cita}"))
            })?;
            let notas = tokens.get(2..).unwrap_or(&[]).join(" ");
            if notas.is_empty() {
               return Err(DomainError::Validation("uso: ia <cita-id> <notas>".to_string()));
            }
            Ok(Self::Ia { cita_id, notas })
         }
         "planes" => Ok(Self::Planes),
         "ruta" => Ok(Self::Ruta),
         "ayuda" | "help" => Ok(Self::Ayuda),
         "salir" | "exit" => Ok(Self::Salir),
         other => Err(DomainError::Validation(format!(
            "Comando desconocido: {other}. Escribe 'ayuda'."
         ))),
      }
   }
}

/// コマンド一覧のヘルプテキスト
const HELP: &str = "\
Comandos disponibles:
  bitacora                  carga la primera página de la bitácora
  mas                       carga más registros
  detalle <id>              abre el detalle de un registro
  roles / grupos            lista roles y grupos
  crear-usuario <u> <e> <p> <rol-id>
  pacientes                 lista pacientes
  historia <paciente-id>    historia clínica
  bi [desde] [hasta] [medico] [especialidad]
  etl                       actualiza el data mart y refresca el BI
  backup                    descarga el backup ZIP
  voz [texto]               comando de voz (sin texto = sin voz detectada)
  ia <cita-id> <notas>      genera el reporte IA de una cita
  planes                    planes de suscripción
  ruta                      muestra la ruta actual
  salir";

/// コンソールの実行状態
///
/// ブラウザ版の各ページが持っていたビュー状態をまとめて所有する。
pub struct Console {
   bitacora_api: Arc<dyn BitacoraApi>,
   browser:      BitacoraBrowser,
   detail:       DetailViewer,
   admin:        AdminUsecase,
   reportes:     ReportesUsecase,
   voice:        VoiceCommandUsecase,
   typed_engine: Arc<TypedCaptureEngine>,
   navigator:    Arc<ConsoleNavigator>,
}

impl Console {
   pub fn new(
      bitacora_api: Arc<dyn BitacoraApi>,
      admin: AdminUsecase,
      reportes: ReportesUsecase,
      voice: VoiceCommandUsecase,
      typed_engine: Arc<TypedCaptureEngine>,
      navigator: Arc<ConsoleNavigator>,
   ) -> Self {
      Self {
         bitacora_api,
         browser: BitacoraBrowser::new(),
         detail: DetailViewer::new(),
         admin,
         reportes,
         voice,
         typed_engine,
         navigator,
      }
   }

   /// コマンドを実行し、表示する行を返す
   pub async fn handle(&mut self, command: ConsoleCommand) -> Vec<String> {
      match self.dispatch(command).await {
         Ok(lines) => lines,
         Err(error) => vec![format!("⚠ {error}")],
      }
   }

   async fn dispatch(&mut self, command: ConsoleCommand) -> Result<Vec<String>, ConsoleError> {
      match command {
         ConsoleCommand::Bitacora => {
            let count = self.browser.load_first(self.bitacora_api.as_ref()).await?;
            tracing::info!("bitácora: {count} registros cargados");
            Ok(vec![
               render::render_entries(self.browser.entries()),
               self.more_hint(),
            ])
         }
         ConsoleCommand::Mas => {
            let appended = self.browser.load_more(self.bitacora_api.as_ref()).await?;
            Ok(vec![
               format!("{appended} registros nuevos"),
               render::render_entries(self.browser.entries()),
               self.more_hint(),
            ])
         }
         ConsoleCommand::Detalle(id) => {
            let updated = self.detail.open(self.bitacora_api.as_ref(), id).await?;
            match (updated, self.detail.current()) {
               (true, Some(entry)) => Ok(vec![render::render_detail(entry)]),
               // 追い越された応答は黙って捨てる
               _ => Ok(Vec::new()),
            }
         }
         ConsoleCommand::Roles => Ok(vec![render::render_roles(&self.admin.roles().await?)]),
         ConsoleCommand::Grupos => Ok(vec![render::render_grupos(&self.admin.grupos().await?)]),
         ConsoleCommand::CrearUsuario(nuevo) => {
            self.admin.crear_usuario(&nuevo).await?;
            Ok(vec![format!(
               "Usuario {} creado. Ruta actual: {}",
               nuevo.username,
               self.navigator.current()
            )])
         }
         ConsoleCommand::Pacientes => Ok(vec![render::render_pacientes(
            &self.admin.pacientes().await?,
         )]),
         ConsoleCommand::Historia(paciente_id) => Ok(vec![render::render_value(
            &self.admin.historia(paciente_id).await?,
         )]),
         ConsoleCommand::Bi(filters) => Ok(vec![render::render_value(
            &self.reportes.dashboard(&filters).await?,
         )]),
         ConsoleCommand::Etl => {
            let data = self.reportes.refresh_datamart(&BiFilters::default()).await?;
            Ok(vec![
               "Data mart actualizado.".to_string(),
               render::render_value(&data),
            ])
         }
         ConsoleCommand::Backup => {
            let path = self.reportes.backup().await?;
            Ok(vec![format!(
               "Backup generado y descargado correctamente: {}",
               path.display()
            )])
         }
         ConsoleCommand::Voz(transcript) => {
            self.typed_engine.queue_transcript(transcript);
            let messages = self.voice.run().await;
            Ok(render_ui(&messages))
         }
         ConsoleCommand::Ia { cita_id, notas } => {
            let reporte = self.reportes.reporte_ia(cita_id, &notas).await?;
            Ok(vec![reporte])
         }
         ConsoleCommand::Planes => Ok(vec![render::render_planes(&self.admin.planes().await?)]),
         ConsoleCommand::Ruta => Ok(vec![self.navigator.current()]),
         ConsoleCommand::Ayuda => Ok(vec![HELP.to_string()]),
         // Salir はループ側で処理される
         ConsoleCommand::Salir => Ok(Vec::new()),
      }
   }

   fn more_hint(&self) -> String {
      if self.browser.has_more() {
         "Escribe 'mas' para cargar más".to_string()
      } else {
         "No hay más registros".to_string()
      }
   }

   /// 標準入力のコマンドループ
   pub async fn run_loop(&mut self) -> std::io::Result<()> {
      use tokio::io::AsyncBufReadExt;

      let stdin = tokio::io::BufReader::new(tokio::io::stdin());
      let mut lines = stdin.lines();

      println!("CliniFlow Console — escribe 'ayuda' para ver los comandos.");
      while let Some(line) = lines.next_line().await? {
         let line = line.trim();
         if line.is_empty() {
            continue;
         }

         match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Salir) => break,
            Ok(command) => {
               for out in self.handle(command).await {
                  println!("{out}");
               }
            }
            Err(error) => println!("⚠ {error}"),
         }
      }
      Ok(())
   }
}

/// ユーザー向けメッセージを表示行に変換する
fn render_ui(messages: &[UiMessage]) -> Vec<String> {
   messages
      .iter()
      .filter_map(|message| match message {
         UiMessage::Feedback(text) => Some(text.clone()),
         UiMessage::Error(text) => Some(format!("⚠ {text}")),
         UiMessage::ClearFeedback => None,
      })
      .collect()
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_単純なコマンドがパースできる() {
      assert_eq!("bitacora".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Bitacora);
      assert_eq!("mas".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Mas);
      assert_eq!("salir".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Salir);
   }

   #[test]
   fn test_detalleはidを取る() {
      assert_eq!(
         "detalle 7".parse::<ConsoleCommand>().unwrap(),
         ConsoleCommand::Detalle(BitacoraId::new(7))
      );
      assert!("detalle".parse::<ConsoleCommand>().is_err());
      assert!("detalle abc".parse::<ConsoleCommand>().is_err());
   }

   #[test]
   fn test_vozは残りの行全体をトランスクリプトにする() {
      assert_eq!(
         "voz descarga el reporte de citas de hoy"
            .parse::<ConsoleCommand>()
            .unwrap(),
         ConsoleCommand::Voz(Some("descarga el reporte de citas de hoy".to_string()))
      );
   }

   #[test]
   fn test_vozだけなら無音を意味する() {
      assert_eq!(
         "voz".parse::<ConsoleCommand>().unwrap(),
         ConsoleCommand::Voz(None)
      );
   }

   #[test]
   fn test_biのフィルタは位置引数で省略可能() {
      let ConsoleCommand::Bi(filters) = "bi 2024-01-01 2024-06-30".parse().unwrap() else {
         panic!("Bi を期待した");
      };

      assert_eq!(filters.start_date, "2024-01-01");
      assert_eq!(filters.end_date, "2024-06-30");
      assert_eq!(filters.medico, "");
      assert_eq!(filters.especialidad, "");
   }

   #[test]
   fn test_crear_usuarioは4引数が必要() {
      let ConsoleCommand::CrearUsuario(nuevo) =
         "crear-usuario ana ana@clinica.bo secreta 2".parse().unwrap()
      else {
         panic!("CrearUsuario を期待した");
      };
      assert_eq!(nuevo.username, "ana");
      assert_eq!(nuevo.rol, 2);

      assert!("crear-usuario ana".parse::<ConsoleCommand>().is_err());
   }

   #[test]
   fn test_iaはidと残りの行のnotasを取る() {
      let ConsoleCommand::Ia { cita_id, notas } =
         "ia 12 paciente con dolor ocular".parse().unwrap()
      else {
         panic!("Ia を期待した");
      };

      assert_eq!(cita_id, 12);
      assert_eq!(notas, "paciente con dolor ocular");
   }

   #[test]
   fn test_未知のコマンドはエラーになる() {
      let error = "imprimir".parse::<ConsoleCommand>().unwrap_err();

      assert!(error.to_string().contains("Comando desconocido"));
   }
}
