//! Selector constants for the identity provider's sign-in screens.
//!
//! The provider ships several generations of markup side by side, so a
//! few conditions carry an old and a new variant. None of this is a
//! stable contract; these are observations of the current pages and the
//! first thing to revisit when detection starts missing.

/// Inline error banner on credential screens.
pub const ERROR_BANNER: &str = "#passwordError, div[role=\"alert\"]";

/// Marker on the abuse / locked-account landing page.
pub const LOCKED_MARKER: &str = "#serviceAbuseLandingTitle";

pub const EMAIL_FIELD: &str = "input[type=\"email\"]";
pub const PASSWORD_FIELD: &str = "input[type=\"password\"]";

/// Recovery-email proof input.
pub const RECOVERY_EMAIL_FIELD: &str = "#iProofEmail";
pub const RECOVERY_EMAIL_ERROR: &str = "#iProofEmailError";

/// "Keep me signed in" interstitial.
pub const KMSI_CHECKBOX: &str = "#KmsiCheckboxField";

/// Passkey enrollment screens.
pub const PASSKEY_VIDEO: &str = "[data-testid=\"biometricVideo\"]";
pub const PASSKEY_ERROR_IMAGE: &str = "[data-testid=\"biometricErrorImage\"]";

/// "Use your password instead" tile on the alternate-methods screen.
pub const USE_PASSWORD_TILE: &str = "#idA_PWD_SwitchToPassword";

/// "Email a code" tile, old and new markup generations.
pub const EMAIL_TILE_OLD: &str = "#idDiv_SAOTCS_Proofs div[data-value=\"OneTimeCode\"]";
pub const EMAIL_TILE_NEW: &str = "[data-testid=\"emailProofTile\"]";

/// Number-matching checkmark shown while a passwordless push is pending.
pub const PASSWORDLESS_MARK: &str = "#idRemoteNGC_DisplaySign";

/// Authenticator one-time-code inputs, old and new generations.
pub const TOTP_INPUT_OLD: &str = "#idTxtBx_SAOTCC_OTC";
pub const TOTP_INPUT_NEW: &str = "input[name=\"otc\"]";
pub const TOTP_ERROR: &str = "#idSpan_SAOTCC_Error_OTC";

/// Generic emailed-code entry screen.
pub const OTP_CODE_INPUT: &str = "#codeEntry";

/// Identity banner shown above the "send a code" primary button.
pub const IDENTITY_BANNER: &str = "[data-testid=\"identityBanner\"]";

pub const PRIMARY_BUTTON: &str = "button[data-testid=\"primaryButton\"]";
pub const SECONDARY_BUTTON: &str = "button[data-testid=\"secondaryButton\"]";

/// Submit control across markup generations.
pub const SUBMIT_ANY: &str = "button[data-testid=\"primaryButton\"], #idSIButton9";

/// Footer link that bypasses the emailed-code step for accounts with a
/// password, and routes code-entry screens back to password entry.
pub const FOOTER_SWITCH_LINK: &str = "[data-testid=\"viewFooter\"] span[role=\"button\"]";

/// Pre-filled account tile on the email screen; when present the email
/// field must not be re-filled.
pub const DISPLAY_NAME: &str = "#displayName";

/// Manual-code input surfaces (either may exist, never both).
pub const CODE_SURFACE_PRIMARY: &str = "#idTxtBx_OTC_Password";
pub const CODE_SURFACE_SECONDARY: &str = "input[name=\"otc\"]";
pub const CODE_ERROR: &str = "#idSpan_OTC_Error, [data-testid=\"codeError\"]";

/// Signed-in account chip on the secondary site.
pub const SECONDARY_SESSION_MARKER: &str = "#id_n";
