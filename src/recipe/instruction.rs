use crate::recipe::image::BaseImage;
use std::fmt;

/// One Dockerfile directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    From(BaseImage),
    Workdir(String),
    Copy { src: String, dest: String },
    Run(String),
    /// Exec form, so the command is the container's initial process.
    Cmd(Vec<String>),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::From(image) => write!(f, "FROM {}", image),
            Instruction::Workdir(dir) => write!(f, "WORKDIR {}", dir),
            Instruction::Copy { src, dest } => write!(f, "COPY {} {}", src, dest),
            Instruction::Run(command) => write!(f, "RUN {}", command),
            Instruction::Cmd(args) => {
                let quoted: Vec<String> = args.iter().map(|arg| json_string(arg)).collect();
                write!(f, "CMD [{}]", quoted.join(", "))
            }
        }
    }
}

fn json_string(value: &str) -> String {
    // serializing a &str cannot fail
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_uses_exec_form() {
        let cmd = Instruction::Cmd(vec!["python".to_string(), "precio_luz.py".to_string()]);
        assert_eq!(cmd.to_string(), r#"CMD ["python", "precio_luz.py"]"#);
    }

    #[test]
    fn test_cmd_escapes_quotes() {
        let cmd = Instruction::Cmd(vec![
            "sh".to_string(),
            "-c".to_string(),
            "echo \"hi\"".to_string(),
        ]);
        assert_eq!(cmd.to_string(), r#"CMD ["sh", "-c", "echo \"hi\""]"#);
    }

    #[test]
    fn test_copy_and_run() {
        let copy = Instruction::Copy {
            src: "requirements.txt".to_string(),
            dest: ".".to_string(),
        };
        assert_eq!(copy.to_string(), "COPY requirements.txt .");
        assert_eq!(
            Instruction::Run("pip install -r requirements.txt".to_string()).to_string(),
            "RUN pip install -r requirements.txt"
        );
    }
}
