//! # 管理系ユースケース
//!
//! ユーザー・ロール管理、患者記録、公開プラン一覧。
//! 各操作は型付きクライアントの薄いオーケストレーションで、
//! 成功後の画面遷移（ナビゲーション）だけをここで足す。

use std::sync::Arc;

use cliniflow_infra::{
   Navigator,
   client::{
      CuentasApi,
      GrupoDto,
      NuevoUsuario,
      PacienteDto,
      PacientesApi,
      PlanDto,
      RolDto,
      SuscripcionesApi,
   },
};

use crate::error::ConsoleError;

/// 管理系ユースケース
pub struct AdminUsecase {
   cuentas:       Arc<dyn CuentasApi>,
   pacientes:     Arc<dyn PacientesApi>,
   suscripciones: Arc<dyn SuscripcionesApi>,
   navigator:     Arc<dyn Navigator>,
}

impl AdminUsecase {
   pub fn new(
      cuentas: Arc<dyn CuentasApi>,
      pacientes: Arc<dyn PacientesApi>,
      suscripciones: Arc<dyn SuscripcionesApi>,
      navigator: Arc<dyn Navigator>,
   ) -> Self {
      Self {
         cuentas,
         pacientes,
         suscripciones,
         navigator,
      }
   }

   pub async fn roles(&self) -> Result<Vec<RolDto>, ConsoleError> {
      Ok(self.cuentas.roles().await?)
   }

   pub async fn grupos(&self) -> Result<Vec<GrupoDto>, ConsoleError> {
      Ok(self.cuentas.grupos().await?)
   }

   /// ユーザーを作成し、成功したらユーザー一覧へ遷移する
   pub async fn crear_usuario(&self, nuevo: &NuevoUsuario) -> Result<(), ConsoleError> {
      self.cuentas.create_usuario(nuevo).await?;
      self.navigator.navigate("/dashboard/usuarios");
      Ok(())
   }

   pub async fn pacientes(&self) -> Result<Vec<PacienteDto>, ConsoleError> {
      Ok(self.pacientes.pacientes().await?)
   }

   /// 患者の臨床歴（構造はバックエンド任せなのでゆるい JSON のまま）
   pub async fn historia(&self, paciente_id: i64) -> Result<serde_json::Value, ConsoleError> {
      Ok(self.pacientes.historia(paciente_id).await?)
   }

   /// 公開プラン一覧（未認証で取得）
   pub async fn planes(&self) -> Result<Vec<PlanDto>, ConsoleError> {
      Ok(self.suscripciones.planes().await?)
   }
}
