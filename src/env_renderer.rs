//! Renders string templates with environment variables that are prefixed with `SIGNUP_`. Inside
//! the template, the variable is then available without the prefix.

use tera::Tera;

#[derive(Debug, Default)]
pub struct EnvRenderer {
    context: tera::Context,
}

const PREFIX: &str = "SIGNUP_";

impl EnvRenderer {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut context = tera::Context::new();
        for (key, value) in vars {
            if let Some(name) = key.strip_prefix(PREFIX) {
                context.insert(name, &value);
            }
        }

        EnvRenderer { context }
    }

    pub fn render(&self, template: &str) -> Result<String, anyhow::Error> {
        let mut tera = Tera::default();
        Ok(tera.render_str(template, &self.context)?)
    }
}
