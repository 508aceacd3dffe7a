// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CanvassPolicy, CoreError, WorkflowConfig};

#[test]
fn test_canvass_policy_parsing() {
    assert_eq!(
        "strict".parse::<CanvassPolicy>().unwrap(),
        CanvassPolicy::Strict
    );
    assert_eq!(
        "enter_on_creation".parse::<CanvassPolicy>().unwrap(),
        CanvassPolicy::EnterOnCreation
    );
    assert_eq!(
        "Allow-From-Draft".parse::<CanvassPolicy>().unwrap(),
        CanvassPolicy::AllowFromDraft
    );
    assert!(matches!(
        "lenient".parse::<CanvassPolicy>(),
        Err(CoreError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_default_config_is_strict() {
    assert_eq!(
        WorkflowConfig::default().canvass_policy,
        CanvassPolicy::Strict
    );
    assert_eq!(CanvassPolicy::AllowFromDraft.to_string(), "allow-from-draft");
}
